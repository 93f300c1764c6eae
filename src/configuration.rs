//
// Default configuration and default values:
//


/// Default sites file (list of hosts to check):
pub const DEFAULT_SITES_FILE: &str = "sites.json";

/// Default log level when nothing is configured:
pub const DEFAULT_LOG_LEVEL: &str = "WARN";

/// Configuration file locations, first existing one wins:
pub const CONFIG_PATHS: [&str; 3] = [
    "/etc/certmole/certmole.conf",
    "/Services/Certmole/service.conf",
    "certmole.conf",
];


/// Default TLS port
pub const DEFAULT_TLS_PORT: u16 = 443;

/// Check connection (connect + handshake) timeout in seconds
pub const CHECK_CONNECTION_TIMEOUT: u64 = 5;


/// Certificates with fewer days left than this are expired
pub const EXPIRED_THRESHOLD_DAYS: i64 = 0;

/// Certificates with at most this many days left expire soon
pub const EXPIRES_SOON_THRESHOLD_DAYS: i64 = 14;

/// Renewal reminder window in days before expiry
pub const REMINDER_WINDOW_DAYS: i64 = 5;

/// Length of the calendar reminder event in minutes
pub const REMINDER_EVENT_MINUTES: i64 = 30;


/// Default SMTP relay
pub const DEFAULT_SMTP_SERVER: &str = "localhost";

/// Default SMTP port
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// Default sender address for alerts and reminders
pub const DEFAULT_SMTP_FROM: &str = "cert-monitor@localhost";


/// Format of the persisted dedup marker (`ending_date`)
pub const MARKER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Human readable not-after, OpenSSL style: "Nov 28 06:12:04 2025 GMT"
pub const NOT_AFTER_DISPLAY_FORMAT: &str = "%b %e %H:%M:%S %Y GMT";

/// ICS timestamps must be UTC in YYYYMMDDTHHMMSSZ
pub const ICS_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";
