mod tests {
    use ledwall_engine::{
        Command, Direction, KeyChannel, KeyEvent, Keymap,
        input::{InputProcessor, InputSource, keys},
        pong::{PaddleMove, Player},
        resolver::ColorMode,
    };

    #[test]
    fn test_wire_decoding() {
        assert_eq!(KeyEvent::from_wire(b'Q'), Some(KeyEvent::press(b'Q')));
        assert_eq!(KeyEvent::from_wire(b'Q' + 128), Some(KeyEvent::release(b'Q')));
        assert_eq!(KeyEvent::from_wire(0), None);
        assert_eq!(KeyEvent::from_wire(0x80), None);
        assert_eq!(KeyEvent::release(keys::F5).to_wire(), 0xF4);
    }

    #[test]
    fn test_digit_keys_select_colors() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.command(KeyEvent::press(b'1')),
            Some(Command::SelectColor(ColorMode::Rainbow))
        );
        assert_eq!(
            keymap.command(KeyEvent::press(b'0')),
            Some(Command::SelectColor(ColorMode::ALL[9]))
        );
        assert_eq!(keymap.command(KeyEvent::release(b'1')), None);
    }

    #[test]
    fn test_momentary_keys_report_both_edges() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.command(KeyEvent::press(keys::SPACE)),
            Some(Command::StrobeOn)
        );
        assert_eq!(
            keymap.command(KeyEvent::release(keys::SPACE)),
            Some(Command::StrobeOff)
        );
        assert_eq!(
            keymap.command(KeyEvent::release(b'K')),
            Some(Command::Paddle {
                player: Player::Two,
                movement: PaddleMove::Down,
                held: false,
            })
        );
    }

    #[test]
    fn test_toggle_bindings() {
        let keymap = Keymap::default();
        let cases = [
            (b'Q', Command::ToggleSolid),
            (b'F', Command::StartFade),
            (keys::UP, Command::SpawnWave(Direction::Up)),
            (keys::DOWN, Command::SpawnWave(Direction::Down)),
            (b'R', Command::ToggleRainbowSweep),
            (b'T', Command::ToggleAlternating),
            (b'P', Command::TogglePong),
            (keys::NUMPAD_ADD, Command::BrightnessUp),
            (keys::NUMPAD_SUBTRACT, Command::BrightnessDown),
            (keys::F5, Command::Reconnect),
        ];
        for (code, command) in cases {
            assert_eq!(keymap.command(KeyEvent::press(code)), Some(command));
        }
        assert_eq!(keymap.command(KeyEvent::press(b'Z')), None);
    }

    #[test]
    fn test_custom_keymap() {
        let keymap = Keymap {
            solid: b'X',
            ..Keymap::default()
        };
        assert_eq!(
            keymap.command(KeyEvent::press(b'X')),
            Some(Command::ToggleSolid)
        );
        assert_eq!(keymap.command(KeyEvent::press(b'Q')), None);
    }

    #[test]
    fn test_auto_repeat_is_dropped() {
        let mut input = InputProcessor::new(Keymap::default());
        assert_eq!(
            input.process(KeyEvent::press(b'Q')),
            Some(Command::ToggleSolid)
        );
        assert!(input.is_held(b'Q'));
        assert_eq!(input.process(KeyEvent::press(b'Q')), None);
        assert_eq!(input.process(KeyEvent::release(b'Q')), None);
        assert!(!input.is_held(b'Q'));
        assert_eq!(
            input.process(KeyEvent::press(b'Q')),
            Some(Command::ToggleSolid)
        );
    }

    #[test]
    fn test_stray_release_is_dropped() {
        let mut input = InputProcessor::new(Keymap::default());
        assert_eq!(input.process(KeyEvent::release(keys::SPACE)), None);
        assert_eq!(input.process(KeyEvent::press(200)), None);
    }

    #[test]
    fn test_channel_is_bounded_fifo() {
        let channel = KeyChannel::<2>::new();
        let sender = channel.sender();
        sender.try_send(KeyEvent::press(b'A')).unwrap();
        sender.try_send(KeyEvent::release(b'A')).unwrap();
        assert!(sender.try_send(KeyEvent::press(b'B')).is_err());
        assert_eq!(channel.len(), 2);

        let mut receiver = channel.receiver();
        assert_eq!(receiver.poll(), Some(KeyEvent::press(b'A')));
        assert_eq!(receiver.poll(), Some(KeyEvent::release(b'A')));
        assert_eq!(receiver.poll(), None);
        assert!(channel.is_empty());
    }
}
