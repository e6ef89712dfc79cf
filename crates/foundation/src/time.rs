/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub fn from_millis(ms: u64) -> Self {
        Time(ms as f64 / 1000.0)
    }

    pub fn after(self, seconds: f64) -> Self {
        Time(self.0 + seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn millis_convert_to_seconds() {
        assert_eq!(Time::from_millis(200), Time(0.2));
        assert_eq!(Time(1.0).after(0.5), Time(1.5));
    }
}
