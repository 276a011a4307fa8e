/// Wall-clock milliseconds as reported by the host (`Date.now()` in the
/// browser). Only differences are meaningful.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Millis(pub u64);

impl Millis {
    pub fn after(self, delay_ms: u64) -> Self {
        Millis(self.0.saturating_add(delay_ms))
    }

    /// Milliseconds remaining until `deadline`, zero once it has passed.
    pub fn until(self, deadline: Millis) -> u64 {
        deadline.0.saturating_sub(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Millis;

    #[test]
    fn after_and_until() {
        let t = Millis(1_000);
        assert_eq!(t.after(250), Millis(1_250));
        assert_eq!(t.until(Millis(1_250)), 250);
        assert_eq!(Millis(2_000).until(Millis(1_250)), 0);
    }
}
