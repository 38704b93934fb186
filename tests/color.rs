mod tests {
    use sculpture_light_engine::color::{
        BLACK, Rgb, blend_colors, linear_brightness, rgb_from_u32, scale_color,
    };
    use sculpture_light_engine::drawing::{
        BlendMode, blend_into, blend_pixel, clear, fade_to_black_by, fill_solid,
    };

    const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn test_blend_colors() {
        let a = Rgb::new(255, 0, 0);
        let b = Rgb::new(0, 255, 0);
        assert_eq!(blend_colors(a, b, 0), a);
        assert_eq!(blend_colors(a, b, 255), b);
        assert_eq!(blend_colors(a, b, 128), Rgb::new(127, 128, 0));
    }

    #[test]
    fn test_scale_color() {
        assert_eq!(scale_color(WHITE, 128), Rgb::new(128, 128, 128));
        assert_eq!(scale_color(WHITE, 0), BLACK);
        assert_eq!(scale_color(WHITE, 255), WHITE);
    }

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0x5BCEFA), Rgb::new(0x5B, 0xCE, 0xFA));
        assert_eq!(rgb_from_u32(0), BLACK);
    }

    #[test]
    fn test_linear_brightness() {
        assert_eq!(linear_brightness(WHITE), 765);
        assert_eq!(linear_brightness(Rgb::new(1, 2, 3)), 6);
    }

    #[test]
    fn test_blend_modes() {
        let dst = Rgb::new(10, 200, 0);
        let src = Rgb::new(100, 50, 0);
        assert_eq!(
            blend_pixel(dst, src, BlendMode::Brighten, 255),
            Rgb::new(100, 200, 0)
        );
        assert_eq!(
            blend_pixel(dst, src, BlendMode::Darken, 255),
            Rgb::new(10, 50, 0)
        );
        assert_eq!(blend_pixel(dst, src, BlendMode::Overwrite, 0), dst);
        assert_eq!(blend_pixel(dst, src, BlendMode::Overwrite, 255), src);
        assert_eq!(
            blend_pixel(
                Rgb::new(100, 100, 100),
                Rgb::new(30, 200, 0),
                BlendMode::Subtract,
                255
            ),
            Rgb::new(70, 0, 100)
        );
    }

    #[test]
    fn test_blend_into_uses_shorter_buffer() {
        let src = [WHITE; 2];
        let mut dst = [BLACK; 3];
        blend_into(&src, &mut dst, BlendMode::Brighten, 255);
        assert_eq!(dst, [WHITE, WHITE, BLACK]);
    }

    #[test]
    fn test_fade_to_black_by() {
        let mut leds = [BLACK; 4];
        fill_solid(&mut leds, WHITE);
        fade_to_black_by(&mut leds, 0);
        assert_eq!(leds, [WHITE; 4]);

        fade_to_black_by(&mut leds, 127);
        assert_eq!(leds[0], Rgb::new(128, 128, 128));

        fade_to_black_by(&mut leds, 255);
        assert_eq!(leds, [BLACK; 4]);

        fill_solid(&mut leds, WHITE);
        clear(&mut leds);
        assert_eq!(leds, [BLACK; 4]);
    }
}
