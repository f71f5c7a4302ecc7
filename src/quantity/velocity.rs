quantity!(MetresPerSecond, suffix: "m/s", precision: 3);

impl MetresPerSecond {
    pub const fn cubed(self) -> f64 {
        self.0 * self.0 * self.0
    }

    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(MetresPerSecond(0.3) < MetresPerSecond(1.0));
        assert_eq!(MetresPerSecond(1.0).max(MetresPerSecond(0.5)), MetresPerSecond(1.0));
    }

    #[test]
    fn test_cubed() {
        assert_eq!(MetresPerSecond(2.0).cubed(), 8.0);
    }
}
