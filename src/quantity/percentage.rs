quantity!(Percentage, suffix: "%", precision: 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Percentage(30.0).to_string(), "30.0 %");
    }
}
