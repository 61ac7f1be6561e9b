use chrono::{Local, NaiveDateTime};

const HUMAN_FORMAT: &str = "%Y-%m-%d  %H:%M:%S";
const FILENAME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A wall-clock instant rendered into the two fixed layouts used by the log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateStamp(NaiveDateTime);

impl DateStamp {
    /// Capture the current local time.
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// `YYYY-MM-DD  HH:MM:SS`, as written on every log line.
    pub fn human(&self) -> String {
        self.0.format(HUMAN_FORMAT).to_string()
    }

    /// `YYYY-MM-DD_HH-MM-SS`, safe to embed in a file name.
    pub fn filename(&self) -> String {
        self.0.format(FILENAME_FORMAT).to_string()
    }
}

impl From<NaiveDateTime> for DateStamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub fn fixed_stamp() -> DateStamp {
        NaiveDate::from_ymd_opt(2021, 4, 3)
            .and_then(|d| d.and_hms_opt(9, 5, 7))
            .map(DateStamp::from)
            .unwrap()
    }

    #[test]
    fn should_render_human_format() {
        assert_eq!(fixed_stamp().human(), "2021-04-03  09:05:07");
    }

    #[test]
    fn should_render_filename_format() {
        assert_eq!(fixed_stamp().filename(), "2021-04-03_09-05-07");
    }

    #[test]
    fn should_capture_current_time_in_human_layout() {
        let rendered = DateStamp::now().human();
        assert_eq!(rendered.len(), 20);
        assert_eq!(&rendered[10..12], "  ");
    }
}
