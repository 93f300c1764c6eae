/// iCalendar reminder artifact
pub mod calendar;

/// Alert and reminder message rendering
pub mod render;

/// Mail delivery
pub mod mail;
