use chrono::TimeDelta;

pub trait FormatHM {
    fn format_hm(&self) -> String;
}

impl FormatHM for TimeDelta {
    fn format_hm(&self) -> String {
        let minutes = self.num_minutes();
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }
}
