use chrono::{DateTime, Utc};
use mt_core::ports::ClockPort;

pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_matches_local_date_of_now() {
        let clock = SystemClock;
        let before = chrono::Local::now().date_naive();
        let today = clock.today();
        let after = chrono::Local::now().date_naive();
        assert!(today == before || today == after);
    }
}
