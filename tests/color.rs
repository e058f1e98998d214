mod tests {
    use ledwall_engine::color::{Hsv, Rgb, add_colors, blend_colors, hsv2rgb, scale_color};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0), RED);
        assert_eq!(blend_colors(RED, BLUE, 255), BLUE);
        assert_eq!(
            blend_colors(RED, BLUE, 128),
            Rgb {
                r: 127,
                g: 0,
                b: 128
            }
        );
        assert_eq!(blend_colors(WHITE, BLACK, 255), BLACK);
    }

    #[test]
    fn test_hsv_sextants() {
        assert_eq!(hsv2rgb(Hsv::new(0.0, 1.0, 1.0)), RED);
        assert_eq!(hsv2rgb(Hsv::new(120.0, 1.0, 1.0)), Rgb::new(0, 255, 0));
        assert_eq!(hsv2rgb(Hsv::new(240.0, 1.0, 1.0)), BLUE);
        assert_eq!(hsv2rgb(Hsv::new(60.0, 1.0, 1.0)), Rgb::new(255, 255, 0));
        assert_eq!(hsv2rgb(Hsv::new(300.0, 1.0, 1.0)), Rgb::new(255, 0, 255));
        assert_eq!(hsv2rgb(Hsv::new(360.0, 1.0, 1.0)), RED);
        assert_eq!(hsv2rgb(Hsv::new(-120.0, 1.0, 1.0)), BLUE);
    }

    #[test]
    fn test_hsv_saturation_and_value() {
        assert_eq!(hsv2rgb(Hsv::new(200.0, 0.0, 1.0)), WHITE);
        assert_eq!(hsv2rgb(Hsv::new(200.0, 1.0, 0.0)), BLACK);
        assert_eq!(hsv2rgb(Hsv::new(0.0, 1.0, 0.5)), Rgb::new(127, 0, 0));
    }

    #[test]
    fn test_scale_color_saturates() {
        assert_eq!(scale_color(Rgb::new(100, 200, 0), 0.5), Rgb::new(50, 100, 0));
        assert_eq!(scale_color(Rgb::new(100, 200, 0), 1.5), Rgb::new(150, 255, 0));
        assert_eq!(scale_color(WHITE, -1.0), BLACK);
    }

    #[test]
    fn test_add_colors_saturates() {
        assert_eq!(
            add_colors(Rgb::new(200, 10, 0), Rgb::new(100, 10, 0)),
            Rgb::new(255, 20, 0)
        );
    }
}
