#[allow(unused_imports)]
#[cfg(test)]
mod tests {

    // Load all internal modules:
    use actix::SyncArbiter;
    use chrono::{DateTime, Duration, NaiveDate, Utc};
    use std::{
        collections::HashMap,
        fs,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
    };

    use crate::notifications::{calendar::build_ics, render::*};
    use crate::outputs::console::*;
    use crate::*;


    fn at(timestamp: &str) -> DateTime<Utc> {
        timestamp.parse::<DateTime<Utc>>().unwrap()
    }


    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }


    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("certmole-{}-{}.json", name, std::process::id()))
            .to_string_lossy()
            .to_string()
    }


    /// Certificate source answering from a fixed table, unknown hosts fail to connect
    struct FakeSource {
        not_after: HashMap<String, DateTime<Utc>>,
        calls: AtomicUsize,
    }


    impl FakeSource {
        fn new(entries: &[(&str, &str)]) -> FakeSource {
            FakeSource {
                not_after: entries
                    .iter()
                    .map(|(host, not_after)| (host.to_string(), at(not_after)))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }


    impl CertificateSource for FakeSource {
        fn fetch(&self, host: &str, port: u16) -> Result<CertificateFacts, Unexpected> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.not_after
                .get(host)
                .map(|not_after| {
                    CertificateFacts {
                        not_after: *not_after,
                    }
                })
                .ok_or_else(|| {
                    Unexpected::ConnectivityOrTls {
                        host: host.to_string(),
                        port,
                        cause: String::from("Connection refused"),
                    }
                })
        }
    }


    /// Courier remembering formatted messages, or failing every delivery
    struct FakeCourier {
        sent: Arc<Mutex<Vec<String>>>,
        failing: bool,
    }


    impl Courier for FakeCourier {
        fn deliver(&self, message: &lettre::Message) -> Result<(), String> {
            if self.failing {
                return Err(String::from("relay unavailable"));
            }
            self.sent
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(&message.formatted()).to_string());
            Ok(())
        }
    }


    fn expiring_notification(status: Status, days_left: i64) -> NotificationRequest {
        NotificationRequest {
            hostname: String::from("a.example"),
            contact: String::from("ops@a.example"),
            not_after_display: String::from("Jan 10 00:00:00 2025 GMT"),
            days_left,
            status,
        }
    }


    fn reminder_request() -> ReminderRequest {
        ReminderRequest {
            hostname: String::from("a.example"),
            port: 443,
            contact: String::from("ops@a.example"),
            remind_at: at("2024-12-30T12:00:00Z"),
            not_after: at("2025-01-04T12:00:00Z"),
        }
    }


    #[test]
    fn test_classify_expires_soon_scenario() {
        let (status, days) = classify(at("2025-01-01T00:00:00Z"), at("2025-01-10T00:00:00Z"));
        assert_eq!(status, Status::ExpiresSoon);
        assert_eq!(days, 9);
    }


    #[test]
    fn test_classify_expired_scenario() {
        let (status, days) = classify(at("2025-01-01T00:00:00Z"), at("2024-12-25T00:00:00Z"));
        assert_eq!(status, Status::Expired);
        assert_eq!(days, -7);
    }


    #[test]
    fn test_classify_ok_scenario() {
        let (status, days) = classify(at("2025-01-01T00:00:00Z"), at("2025-06-01T00:00:00Z"));
        assert_eq!(status, Status::Ok);
        assert_eq!(days, 151);
    }


    #[test]
    fn test_classify_floors_partial_days() {
        let now = at("2025-01-01T12:00:00Z");
        assert_eq!(classify(now, at("2025-01-01T00:00:00Z")), (Status::Expired, -1));
        assert_eq!(classify(now, at("2025-01-01T11:59:59Z")), (Status::Expired, -1));
        assert_eq!(classify(now, now), (Status::ExpiresSoon, 0));
        assert_eq!(classify(now, now + Duration::hours(23)), (Status::ExpiresSoon, 0));
        assert_eq!(
            classify(now, now + Duration::days(15) - Duration::seconds(1)),
            (Status::ExpiresSoon, 14)
        );
        assert_eq!(classify(now, now + Duration::days(15)), (Status::Ok, 15));
    }


    #[test]
    fn test_classify_thresholds_hold_across_offsets() {
        let now = at("2025-03-15T08:30:00Z");
        for hours in (-24 * 40..24 * 40).step_by(7) {
            let not_after = now + Duration::hours(hours);
            let (status, days) = classify(now, not_after);
            assert!(status != Status::Error);
            if not_after < now {
                assert_eq!(status, Status::Expired);
                assert!(days < 0);
            } else if days <= 14 {
                assert_eq!(status, Status::ExpiresSoon);
                assert!(days >= 0);
            } else {
                assert_eq!(status, Status::Ok);
            }
        }
    }


    #[test]
    fn test_classify_floors_sub_second_remainders() {
        let not_after = at("2025-01-10T00:00:00Z");
        let just_after = not_after + Duration::milliseconds(500);
        assert_eq!(classify(just_after, not_after), (Status::Expired, -1));
        assert_eq!(
            classify(just_after + Duration::days(1), not_after),
            (Status::Expired, -2)
        );
        assert_eq!(
            classify(not_after - Duration::milliseconds(500), not_after),
            (Status::ExpiresSoon, 0)
        );
        assert_eq!(
            classify(not_after - Duration::days(15) + Duration::milliseconds(1), not_after),
            (Status::ExpiresSoon, 14)
        );
        assert_eq!(
            decide_reminder(
                not_after - Duration::days(6) + Duration::nanoseconds(1),
                not_after,
                None,
                5
            ),
            ReminderDecision::Fire(day(2025, 1, 10))
        );
    }


    #[test]
    fn test_reminder_fires_without_marker() {
        let decision = decide_reminder(
            at("2025-01-01T00:00:00Z"),
            at("2025-01-04T00:00:00Z"),
            None,
            REMINDER_WINDOW_DAYS,
        );
        assert!(decision.send_now());
        assert_eq!(decision.new_last_recorded_expiry(), Some(day(2025, 1, 4)));
    }


    #[test]
    fn test_reminder_holds_before_marker_passes() {
        let decision = decide_reminder(
            at("2025-01-02T00:00:00Z"),
            at("2025-01-04T00:00:00Z"),
            Some(day(2025, 1, 4)),
            REMINDER_WINDOW_DAYS,
        );
        assert_eq!(decision, ReminderDecision::Hold);
        assert!(!decision.send_now());
        assert_eq!(decision.new_last_recorded_expiry(), None);
    }


    #[test]
    fn test_reminder_is_idempotent() {
        let now = at("2025-01-01T06:00:00Z");
        let not_after = at("2025-01-04T18:00:00Z");
        for marker in [None, Some(day(2024, 12, 1)), Some(day(2025, 1, 4))] {
            assert_eq!(
                decide_reminder(now, not_after, marker, 5),
                decide_reminder(now, not_after, marker, 5)
            );
        }
    }


    #[test]
    fn test_reminder_fed_back_marker_holds() {
        let not_after = at("2025-01-04T18:00:00Z");
        let first = decide_reminder(at("2025-01-01T06:00:00Z"), not_after, None, 5);
        let marker = first.new_last_recorded_expiry();
        assert!(marker.is_some());

        for later in ["2025-01-01T07:00:00Z", "2025-01-02T00:00:00Z", "2025-01-03T23:59:59Z"] {
            assert_eq!(
                decide_reminder(at(later), not_after, marker, 5),
                ReminderDecision::Hold
            );
        }
    }


    #[test]
    fn test_reminder_marker_boundary_is_midnight_utc() {
        let not_after = at("2025-01-04T18:00:00Z");
        let marker = Some(day(2025, 1, 4));
        assert_eq!(
            decide_reminder(at("2025-01-04T00:00:00Z"), not_after, marker, 5),
            ReminderDecision::Hold
        );
        assert_eq!(
            decide_reminder(at("2025-01-04T00:00:01Z"), not_after, marker, 5),
            ReminderDecision::Fire(day(2025, 1, 4))
        );
    }


    #[test]
    fn test_reminder_renewal_rearms() {
        let renewed = at("2025-04-04T10:00:00Z");
        let decision = decide_reminder(
            at("2025-03-31T09:00:00Z"),
            renewed,
            Some(day(2025, 1, 4)),
            5,
        );
        assert_eq!(decision, ReminderDecision::Fire(day(2025, 4, 4)));
    }


    #[test]
    fn test_reminder_outside_window_holds() {
        let decision = decide_reminder(
            at("2025-01-01T00:00:00Z"),
            at("2025-06-01T00:00:00Z"),
            None,
            5,
        );
        assert_eq!(decision, ReminderDecision::Hold);
        let edge = decide_reminder(
            at("2025-01-01T00:00:00Z"),
            at("2025-01-06T23:00:00Z"),
            None,
            5,
        );
        assert!(edge.send_now());
    }


    #[test]
    fn test_malformed_marker_treated_as_absent() {
        assert_eq!(parse_marker(Some("04/01/2025"), "a.example"), None);
        assert_eq!(parse_marker(Some(""), "a.example"), None);
        assert_eq!(parse_marker(None, "a.example"), None);
        assert_eq!(parse_marker(Some(" 2025-01-04 "), "a.example"), Some(day(2025, 1, 4)));

        let marker = parse_marker(Some("not-a-date"), "a.example");
        let decision = decide_reminder(
            at("2025-01-02T00:00:00Z"),
            at("2025-01-04T00:00:00Z"),
            marker,
            5,
        );
        assert!(decision.send_now());
    }


    #[test]
    fn test_summary_precedence() {
        let error_and_soon = RunSummary::default()
            .with(Status::Error)
            .with(Status::ExpiresSoon);
        assert_eq!(error_and_soon.exit_signal(), ExitSignal::Fail);

        let soon = RunSummary::default().with(Status::Ok).with(Status::ExpiresSoon);
        assert_eq!(soon.exit_signal(), ExitSignal::Warn);

        let expired = RunSummary::default().with(Status::Expired).with(Status::Ok);
        assert_eq!(expired.exit_signal(), ExitSignal::Fail);

        assert_eq!(RunSummary::default().with(Status::Ok).exit_signal(), ExitSignal::Ok);
        assert_eq!(RunSummary::default().exit_signal(), ExitSignal::Ok);

        let mut side_effect = RunSummary::default().with(Status::Ok);
        side_effect.record_failures(1);
        assert_eq!(side_effect.exit_signal(), ExitSignal::Fail);
        assert_eq!(side_effect.total(), 1);
    }


    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitSignal::Ok.code(), 0);
        assert_eq!(ExitSignal::Warn.code(), 2);
        assert_eq!(ExitSignal::Fail.code(), 1);
    }


    #[test]
    fn test_run_with_error_ok_and_disabled_host() {
        let source = FakeSource::new(&[
            ("fine.example", "2025-06-01T00:00:00Z"),
            ("off.example", "2024-12-01T00:00:00Z"),
        ]);
        let hosts = vec![
            HostTarget::new("broken.example"),
            HostTarget::new("fine.example"),
            HostTarget::new("off.example").with_enable(false),
        ];
        let report = run(&source, &hosts, at("2025-01-01T00:00:00Z"), &RunOptions::default());

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].hostname, "broken.example");
        assert_eq!(report.results[0].status(), Status::Error);
        assert_eq!(report.results[1].hostname, "fine.example");
        assert_eq!(report.results[1].status(), Status::Ok);
        assert_eq!(report.summary.error, 1);
        assert_eq!(report.summary.ok, 1);
        assert_eq!(report.summary.expired, 0);
        assert_eq!(report.summary.expires_soon, 0);
        assert_eq!(report.summary.exit_signal(), ExitSignal::Fail);
    }


    #[test]
    fn test_evaluation_result_holds_days_or_error() {
        let source = FakeSource::new(&[("fine.example", "2025-06-01T00:00:00Z")]);
        let now = at("2025-01-01T00:00:00Z");
        let options = RunOptions::default();

        let checked = evaluate_host(&source, &HostTarget::new("fine.example"), now, &options).result;
        assert_eq!(checked.days_left(), Some(151));
        assert_eq!(checked.error_description(), None);
        assert_eq!(checked.not_after(), Some(at("2025-06-01T00:00:00Z")));

        let failed = evaluate_host(
            &source,
            &HostTarget::new("broken.example").with_port(8443),
            now,
            &options,
        )
        .result;
        assert_eq!(failed.days_left(), None);
        assert_eq!(failed.port, 8443);
        assert!(failed
            .error_description()
            .unwrap()
            .contains("broken.example:8443 -> Connection refused"));
    }


    #[test]
    fn test_empty_hostname_fails_fast() {
        let source = FakeSource::new(&[]);
        let evaluation = evaluate_host(
            &source,
            &HostTarget::new("   "),
            at("2025-01-01T00:00:00Z"),
            &RunOptions::default(),
        );
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(evaluation.result.status(), Status::Error);
        assert!(evaluation
            .result
            .error_description()
            .unwrap()
            .contains("Invalid host target"));
    }


    #[test]
    fn test_alert_requested_only_with_contact_and_notify() {
        let source = FakeSource::new(&[("soon.example", "2025-01-10T00:00:00Z")]);
        let now = at("2025-01-01T00:00:00Z");
        let with_contact = HostTarget::new("soon.example").with_contact("ops@soon.example");

        let evaluation = evaluate_host(&source, &with_contact, now, &RunOptions::default());
        let notification = evaluation.notification.unwrap();
        assert_eq!(notification.status, Status::ExpiresSoon);
        assert_eq!(notification.days_left, 9);
        assert_eq!(notification.contact, "ops@soon.example");
        assert_eq!(notification.not_after_display, "Jan 10 00:00:00 2025 GMT");
        assert!(evaluation.reminder.is_none());

        let quiet = RunOptions {
            notify: false,
            ..RunOptions::default()
        };
        assert!(evaluate_host(&source, &with_contact, now, &quiet)
            .notification
            .is_none());

        let blank_contact = HostTarget::new("soon.example").with_contact("  ");
        assert!(evaluate_host(&source, &blank_contact, now, &RunOptions::default())
            .notification
            .is_none());
    }


    #[test]
    fn test_ok_host_gets_no_alert() {
        let source = FakeSource::new(&[("fine.example", "2025-06-01T00:00:00Z")]);
        let host = HostTarget::new("fine.example").with_contact("ops@fine.example");
        let evaluation = evaluate_host(&source, &host, at("2025-01-01T00:00:00Z"), &RunOptions::default());
        assert!(evaluation.notification.is_none());
    }


    #[test]
    fn test_reminder_requested_and_marker_updated() {
        let source = FakeSource::new(&[("soon.example", "2025-01-04T12:00:00Z")]);
        let options = RunOptions {
            remind: true,
            ..RunOptions::default()
        };
        let host = HostTarget::new("soon.example").with_contact("ops@soon.example");
        let evaluation = evaluate_host(&source, &host, at("2025-01-01T00:00:00Z"), &options);

        let reminder = evaluation.reminder.unwrap();
        assert_eq!(reminder.remind_at, at("2024-12-30T12:00:00Z"));
        assert_eq!(reminder.contact, "ops@soon.example");
        let update = evaluation.update.unwrap();
        assert_eq!(update.hostname, "soon.example");
        assert_eq!(update.new_last_recorded_expiry, day(2025, 1, 4));

        let recorded = host.clone().with_ending_date("2025-01-04");
        let again = evaluate_host(&source, &recorded, at("2025-01-02T00:00:00Z"), &options);
        assert!(again.reminder.is_none());
        assert!(again.update.is_none());

        let no_contact = HostTarget::new("soon.example");
        assert!(evaluate_host(&source, &no_contact, at("2025-01-01T00:00:00Z"), &options)
            .reminder
            .is_none());
    }


    #[test]
    fn test_report_delivered_updates() {
        let source = FakeSource::new(&[
            ("a.example", "2025-01-03T00:00:00Z"),
            ("b.example", "2025-01-04T00:00:00Z"),
        ]);
        let options = RunOptions {
            remind: true,
            ..RunOptions::default()
        };
        let hosts = vec![
            HostTarget::new("a.example").with_contact("ops@a.example"),
            HostTarget::new("b.example").with_contact("ops@b.example"),
        ];
        let report = run(&source, &hosts, at("2025-01-01T00:00:00Z"), &options);
        assert_eq!(report.reminders.len(), 2);
        assert_eq!(report.updates.len(), 2);
        assert_eq!(report.notifications.len(), 2);

        let delivered = report.delivered_updates(&[(String::from("b.example"), 443)]);
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].new_last_recorded_expiry, day(2025, 1, 4));
    }


    #[test]
    fn test_markers_stay_per_host_entry() {
        let mut hosts = vec![
            HostTarget::new("example.com").with_contact("ops@example.com"),
            HostTarget::new("example.com")
                .with_port(8443)
                .with_contact("ops@example.com")
                .with_ending_date("2030-01-01"),
        ];
        let changed = apply_updates(
            &mut hosts,
            &[ExpiryUpdate {
                hostname: String::from("example.com"),
                port: 443,
                new_last_recorded_expiry: day(2025, 1, 4),
            }],
        );
        assert_eq!(changed, 1);
        assert_eq!(hosts[0].ending_date.as_deref(), Some("2025-01-04"));
        assert_eq!(hosts[1].ending_date.as_deref(), Some("2030-01-01"));

        let source = FakeSource::new(&[("example.com", "2025-01-04T00:00:00Z")]);
        let options = RunOptions {
            remind: true,
            ..RunOptions::default()
        };
        let mut fresh = vec![
            HostTarget::new("example.com").with_contact("ops@example.com"),
            HostTarget::new("example.com")
                .with_port(8443)
                .with_contact("ops@example.com"),
        ];
        let report = run(&source, &fresh, at("2025-01-01T00:00:00Z"), &options);
        assert_eq!(report.updates.len(), 2);
        assert_eq!(report.reminders[1].port, 8443);

        let delivered = report.delivered_updates(&[(String::from("example.com"), 8443)]);
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].port, 8443);
        assert_eq!(apply_updates(&mut fresh, &delivered), 1);
        assert_eq!(fresh[0].ending_date, None);
        assert_eq!(fresh[1].ending_date.as_deref(), Some("2025-01-04"));
    }


    #[test]
    fn test_load_sites_skips_invalid_entries() {
        let hosts = load_sites("tests/sites.json").unwrap();
        assert_eq!(hosts.len(), 3);

        let alpha = &hosts[0];
        assert_eq!(alpha.hostname(), "alpha.example");
        assert_eq!(alpha.port(), 8443);
        assert_eq!(alpha.contact(), Some("ops@alpha.example"));
        assert!(alpha.enabled());
        assert_eq!(alpha.ending_date.as_deref(), Some("2025-01-04"));
        assert_eq!(alpha.extra.get("owner").and_then(|owner| owner.as_str()), Some("team-a"));

        let beta = &hosts[1];
        assert_eq!(beta.port(), DEFAULT_TLS_PORT);
        assert!(beta.enabled());
        assert_eq!(beta.contact(), None);

        let epsilon = &hosts[2];
        assert_eq!(epsilon.hostname(), "epsilon.example");
        assert_eq!(epsilon.port(), 9443);
        assert!(!epsilon.enabled());
        assert_eq!(epsilon.contact(), None);
    }


    #[test]
    fn test_load_sites_failures() {
        assert_eq!(
            load_sites("tests/missing.json"),
            Err(Unexpected::SitesNotFound(String::from("tests/missing.json")))
        );
        assert_eq!(load_sites("tests/not_a_list.json"), Err(Unexpected::SitesNotAList));
        assert!(matches!(
            load_sites("tests/broken.json"),
            Err(Unexpected::SitesInvalid(..))
        ));
    }


    #[test]
    fn test_save_sites_keeps_backup_and_unknown_keys() {
        let path = temp_path("save-sites");
        fs::copy("tests/sites.json", &path).unwrap();

        let mut hosts = load_sites(&path).unwrap();
        let changed = apply_updates(
            &mut hosts,
            &[ExpiryUpdate {
                hostname: String::from("beta.example"),
                port: DEFAULT_TLS_PORT,
                new_last_recorded_expiry: day(2025, 3, 1),
            }],
        );
        assert_eq!(changed, 1);
        save_sites(&path, &hosts).unwrap();

        let backup = format!("{}.bak", path);
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            fs::read_to_string("tests/sites.json").unwrap()
        );
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n]\n"));

        let reloaded = load_sites(&path).unwrap();
        assert_eq!(reloaded, hosts);
        assert_eq!(reloaded[1].ending_date.as_deref(), Some("2025-03-01"));
        assert!(reloaded[1].port.is_none());
        assert_eq!(reloaded[0].extra.get("owner").and_then(|owner| owner.as_str()), Some("team-a"));

        fs::remove_file(&path).unwrap_or_default();
        fs::remove_file(&backup).unwrap_or_default();
    }


    #[test]
    fn test_ics_reminder_content() {
        let ics = build_ics(&reminder_request(), "certs@example.com", at("2025-01-01T00:00:00Z"));
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("UID:a.example-20250104T120000Z@certmole\r\n"));
        assert!(ics.contains("DTSTAMP:20250101T000000Z\r\n"));
        assert!(ics.contains("DTSTART:20241230T120000Z\r\n"));
        assert!(ics.contains("DTEND:20241230T123000Z\r\n"));
        assert!(ics.contains("ORGANIZER:MAILTO:certs@example.com\r\n"));
        assert!(ics.contains("ATTENDEE;CN=ops@a.example:MAILTO:ops@a.example\r\n"));
        assert!(ics.contains("SUMMARY:Renew TLS certificate: a.example\r\n"));
    }


    #[test]
    fn test_alert_subjects_and_body() {
        let soon = expiring_notification(Status::ExpiresSoon, 9);
        assert_eq!(
            alert_subject(&soon),
            "[ALERT] TLS certificate expiring soon for a.example"
        );
        assert!(alert_html(&soon).contains("expires in <strong>9</strong>"));

        let expired = expiring_notification(Status::Expired, -7);
        assert_eq!(alert_subject(&expired), "[ALERT] TLS certificate expired for a.example");
        let html = alert_html(&expired);
        assert!(html.contains("<strong>7</strong> day(s) ago"));
        assert!(html.contains("Jan 10 00:00:00 2025 GMT"));

        let message = alert_message("certs@example.com", &expired).unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(formatted.contains("Subject: [ALERT] TLS certificate expired for a.example"));
        assert!(formatted.contains("ops@a.example"));
    }


    #[test]
    fn test_reminder_message_has_calendar_attachment() {
        let message = reminder_message(
            "certs@example.com",
            &reminder_request(),
            5,
            at("2025-01-01T00:00:00Z"),
        )
        .unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(formatted.contains("Subject: [REMINDER] Renew TLS certificate: a.example"));
        assert!(formatted.contains("text/calendar"));
        assert!(formatted.contains("renew-a.example.ics"));

        let text = reminder_text(&reminder_request(), 5);
        assert!(text.contains("a.example certificate expires on 2025-01-04 12:00:00 UTC."));
        assert!(text.contains("(5 days before)"));
    }


    #[test]
    fn test_dispatch_counts_deliveries_and_failures() {
        let sent = Arc::new(Mutex::new(vec![]));
        let courier = FakeCourier {
            sent: sent.clone(),
            failing: false,
        };
        let now = at("2025-01-01T00:00:00Z");
        let notifications = vec![
            expiring_notification(Status::ExpiresSoon, 9),
            NotificationRequest {
                contact: String::from("not an address"),
                ..expiring_notification(Status::Expired, -1)
            },
        ];
        let reminders = vec![reminder_request()];

        let delivery = dispatch(&courier, "certs@example.com", &notifications, &reminders, 5, now);
        assert_eq!(delivery.failures, 1);
        assert_eq!(delivery.reminded, vec![(String::from("a.example"), 443)]);
        assert_eq!(sent.lock().unwrap().len(), 2);

        let broken = FakeCourier {
            sent: Arc::new(Mutex::new(vec![])),
            failing: true,
        };
        let delivery = dispatch(&broken, "certs@example.com", &notifications, &reminders, 5, now);
        assert_eq!(delivery.failures, 3);
        assert!(delivery.reminded.is_empty());
    }


    #[actix_rt::test]
    async fn test_notificator_actor_delivers() {
        let sent = Arc::new(Mutex::new(vec![]));
        let shared = sent.clone();
        let notificator = SyncArbiter::start(1, move || {
            Notificator::new(
                Box::new(FakeCourier {
                    sent: shared.clone(),
                    failing: false,
                }),
                "certs@example.com",
                5,
            )
        });
        let delivery = notificator
            .send(Deliver {
                notifications: vec![expiring_notification(Status::Expired, -2)],
                reminders: vec![reminder_request()],
                now: at("2025-01-01T00:00:00Z"),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(delivery.failures, 0);
        assert_eq!(delivery.reminded, vec![(String::from("a.example"), 443)]);
        assert_eq!(sent.lock().unwrap().len(), 2);
    }


    #[actix_rt::test]
    async fn test_notificator_rejects_invalid_sender() {
        let notificator = SyncArbiter::start(1, || {
            Notificator::new(
                Box::new(FakeCourier {
                    sent: Arc::new(Mutex::new(vec![])),
                    failing: false,
                }),
                "no sender here",
                5,
            )
        });
        let result = notificator
            .send(Deliver {
                notifications: vec![expiring_notification(Status::Expired, -2)],
                reminders: vec![],
                now: at("2025-01-01T00:00:00Z"),
            })
            .await
            .unwrap();
        assert!(matches!(result, Err(Unexpected::Message(..))));
    }


    #[test]
    fn test_console_output() {
        let results = vec![
            EvaluationResult::checked(
                "fine.example",
                443,
                Status::Ok,
                151,
                at("2025-06-01T00:00:00Z"),
            ),
            EvaluationResult::error(
                "broken.example",
                8443,
                &Unexpected::ConnectivityOrTls {
                    host: String::from("broken.example"),
                    port: 8443,
                    cause: String::from("timed out"),
                },
            ),
        ];
        let summary = RunSummary::fold(&results);

        let table = render_table(&results);
        assert!(table.starts_with("SITENAME"));
        assert!(table.contains("fine.example"));
        assert!(table.contains("Jun  1 00:00:00 2025 GMT"));
        assert!(table.contains("broken.example:8443 -> timed out"));

        let block = render_summary(&summary);
        assert!(block.contains("OK          : 1"));
        assert!(block.contains("ERROR       : 1"));
        assert!(!block.contains("EXPIRED"));

        assert_eq!(
            render_json(&summary).unwrap(),
            r#"{"OK":1,"EXPIRES SOON":0,"EXPIRED":0,"ERROR":1}"#
        );
    }


    #[test]
    fn test_failed_side_effects_reported() {
        let mut summary = RunSummary::default().with(Status::Ok);
        summary.record_failures(2);
        assert!(render_summary(&summary).ends_with("  FAILED      : 2\n"));
        assert_eq!(
            render_json(&summary).unwrap(),
            r#"{"OK":1,"EXPIRES SOON":0,"EXPIRED":0,"ERROR":0,"FAILED":2}"#
        );
        assert_eq!(summary.exit_signal(), ExitSignal::Fail);
        assert_eq!(summary.total(), 1);
    }


    #[test]
    fn test_config_loading() {
        let config = Config::load_from("tests/certmole.conf").unwrap();
        assert_eq!(config.sites_file(), "tests/sites.json");
        assert_eq!(config.get_log_level(), tracing::level_filters::LevelFilter::DEBUG);
        assert_eq!(config.connection_timeout(), std::time::Duration::from_secs(9));
        assert_eq!(config.reminder_window_days(), 7);
        let smtp = config.smtp();
        assert_eq!(smtp.server, "mail.example");
        assert_eq!(smtp.port, DEFAULT_SMTP_PORT);
        assert_eq!(smtp.from, "certs@example.com");
        assert!(!smtp.starttls);

        assert!(matches!(
            Config::load_from("tests/no-such.conf"),
            Err(Unexpected::ConfigInvalid(..))
        ));
        assert!(matches!(
            Config::load_from("tests/broken.json"),
            Err(Unexpected::ConfigInvalid(..))
        ));
        let defaults = Config::default();
        assert_eq!(defaults.sites_file(), DEFAULT_SITES_FILE);
        assert_eq!(defaults.get_log_level(), tracing::level_filters::LevelFilter::WARN);
        assert_eq!(
            defaults.connection_timeout(),
            std::time::Duration::from_secs(CHECK_CONNECTION_TIMEOUT)
        );
        assert_eq!(defaults.reminder_window_days(), REMINDER_WINDOW_DAYS);
        assert_eq!(defaults.smtp(), SmtpConfig::default());
    }


    #[test]
    fn test_host_target_defaults() {
        let host = HostTarget::from_entry(1, serde_json::json!({"sitename": "h.example", "port": 0}))
            .unwrap();
        assert_eq!(host.port(), DEFAULT_TLS_PORT);
        assert!(host.enabled());

        let negative = HostTarget::from_entry(2, serde_json::json!({"sitename": "h.example", "port": -1}));
        assert!(matches!(negative, Err(Unexpected::Configuration(..))));

        let blank = HostTarget::from_entry(3, serde_json::json!({"sitename": "  "}));
        assert!(matches!(blank, Err(Unexpected::Configuration(..))));
    }
}
