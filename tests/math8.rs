mod tests {
    use embassy_time::Instant;
    use ledwall_engine::math8::{blend8, elapsed_ms, unit8};

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(255, 128, 0), 255);
    }

    #[test]
    fn test_unit8() {
        assert_eq!(unit8(0.0), 0);
        assert_eq!(unit8(0.5), 128);
        assert_eq!(unit8(1.0), 255);
        assert_eq!(unit8(-0.3), 0);
        assert_eq!(unit8(7.0), 255);
    }

    #[test]
    fn test_elapsed_ms_saturates() {
        let start = Instant::from_millis(100);
        assert_eq!(elapsed_ms(start, Instant::from_millis(250)), 150);
        assert_eq!(elapsed_ms(start, Instant::from_millis(50)), 0);
    }
}
