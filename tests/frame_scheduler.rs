mod tests {
    use std::collections::VecDeque;
    use std::vec::Vec;

    use embassy_time::{Duration, Instant};
    use ledwall_engine::{
        AudioSampleSource, Engine, EngineConfig, FrameScheduler, InputSource, KeyChannel,
        KeyEvent, LinkState, OutputVariant, SchedulerConfig, Transport, TransportError,
        input::keys,
        protocol::{CMD, ROW_FRAME_LEN},
    };

    #[derive(Default)]
    struct MockTransport {
        packets: Vec<Vec<u8>>,
        /// Bytes accepted per write, everything when `None`
        accept: Option<usize>,
        timeout: bool,
        down: bool,
        write_calls: usize,
        reconnects: usize,
    }

    impl Transport for MockTransport {
        fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
            self.write_calls += 1;
            if self.down {
                return Err(TransportError::Unavailable);
            }
            if self.timeout {
                return Err(TransportError::Timeout);
            }
            let n = self.accept.map_or(bytes.len(), |max| max.min(bytes.len()));
            self.packets.push(bytes[..n].to_vec());
            Ok(n)
        }

        fn reconnect(&mut self) -> Result<(), TransportError> {
            self.reconnects += 1;
            self.down = false;
            Ok(())
        }
    }

    #[derive(Default)]
    struct ScriptedKeys(VecDeque<KeyEvent>);

    impl ScriptedKeys {
        fn tap(&mut self, code: u8) {
            self.0.push_back(KeyEvent::press(code));
            self.0.push_back(KeyEvent::release(code));
        }
    }

    impl InputSource for ScriptedKeys {
        fn poll(&mut self) -> Option<KeyEvent> {
            self.0.pop_front()
        }
    }

    #[derive(Default)]
    struct ScriptedAudio(VecDeque<u8>);

    impl AudioSampleSource for ScriptedAudio {
        fn read_sample(&mut self) -> Option<u8> {
            self.0.pop_front()
        }
    }

    type Scheduler = FrameScheduler<ScriptedKeys, ScriptedAudio, MockTransport>;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn scheduler(transport: MockTransport, config: &SchedulerConfig) -> Scheduler {
        FrameScheduler::new(
            Engine::new(&EngineConfig::default(), at(0)),
            ScriptedKeys::default(),
            ScriptedAudio::default(),
            transport,
            config,
        )
    }

    fn streaming(transport: MockTransport) -> Scheduler {
        scheduler(transport, &SchedulerConfig::default())
    }

    #[test]
    fn test_streams_one_row_frame_per_tick() {
        let mut scheduler = streaming(MockTransport::default());
        for ms in 0..3 {
            let result = scheduler.tick(at(ms));
            assert_eq!(result.bytes_written, ROW_FRAME_LEN);
            assert_eq!(result.sleep_duration, Duration::from_ticks(0));
        }

        let transport = scheduler.transport();
        assert_eq!(transport.packets.len(), 3);
        assert_eq!(&transport.packets[0][..2], &[CMD, 22]);
        assert_eq!(scheduler.stats().frames_sent, 3);
    }

    #[test]
    fn test_partial_writes_are_counted() {
        let mut scheduler = streaming(MockTransport {
            accept: Some(10),
            ..MockTransport::default()
        });
        let result = scheduler.tick(at(0));
        assert_eq!(result.bytes_written, 10);

        scheduler.transport_mut().timeout = true;
        let result = scheduler.tick(at(1));
        assert_eq!(result.bytes_written, 0);

        let stats = scheduler.stats();
        assert_eq!(stats.partial_writes, 2);
        assert_eq!(stats.frames_sent, 0);
        assert_eq!(scheduler.link_state(), LinkState::Connected);
    }

    #[test]
    fn test_unavailable_link_waits_for_reconnect() {
        let mut scheduler = streaming(MockTransport {
            down: true,
            ..MockTransport::default()
        });

        scheduler.tick(at(0));
        assert_eq!(scheduler.link_state(), LinkState::Unavailable);
        scheduler.tick(at(1));
        scheduler.tick(at(2));
        assert_eq!(scheduler.transport().write_calls, 1);
        assert_eq!(scheduler.stats().skipped_frames, 3);

        // Link came back, but nothing is written until a reconnect is asked for
        scheduler.transport_mut().down = false;
        scheduler.tick(at(3));
        assert_eq!(scheduler.transport().write_calls, 1);

        scheduler.input_mut().tap(keys::F5);
        let result = scheduler.tick(at(4));
        assert_eq!(scheduler.transport().reconnects, 1);
        assert_eq!(scheduler.link_state(), LinkState::Connected);
        assert_eq!(result.bytes_written, ROW_FRAME_LEN);
    }

    #[test]
    fn test_pong_frames_are_paced() {
        let config = SchedulerConfig::default();
        let mut scheduler = scheduler(MockTransport::default(), &config);
        scheduler.input_mut().tap(b'P');

        let first = scheduler.tick(at(0));
        assert_eq!(first.sleep_duration, config.pong_frame_delay);
        assert_eq!(first.bytes_written, 10);
        assert_eq!(&scheduler.transport().packets[0][..4], &[CMD, 25, 0, 0]);

        let second = scheduler.tick(at(5));
        assert_eq!(second.bytes_written, 6);
        assert_eq!(&scheduler.transport().packets[1][..2], &[CMD, 24]);
    }

    #[test]
    fn test_preset_output_announces_mode_changes_only() {
        let config = SchedulerConfig {
            output: OutputVariant::Preset,
            ..SchedulerConfig::default()
        };
        let mut scheduler = scheduler(MockTransport::default(), &config);

        assert_eq!(scheduler.tick(at(0)).bytes_written, 2);
        assert_eq!(scheduler.tick(at(1)).bytes_written, 0);

        scheduler.input_mut().tap(b'R');
        assert_eq!(scheduler.tick(at(2)).bytes_written, 2);

        // No pacing without streaming, even in pong
        scheduler.input_mut().tap(b'P');
        assert_eq!(scheduler.tick(at(3)).sleep_duration, Duration::from_ticks(0));

        let packets = &scheduler.transport().packets;
        assert_eq!(packets.len(), 3);
        assert_eq!(packets[0], [CMD, 0]);
        assert_eq!(packets[1], [CMD, 5]);
        assert_eq!(packets[2], [CMD, 7]);
    }

    #[test]
    fn test_preset_resends_undelivered_mode() {
        let config = SchedulerConfig {
            output: OutputVariant::Preset,
            ..SchedulerConfig::default()
        };
        let mut scheduler = scheduler(MockTransport::default(), &config);
        scheduler.tick(at(0));

        scheduler.transport_mut().timeout = true;
        scheduler.input_mut().tap(b'R');
        assert_eq!(scheduler.tick(at(1)).bytes_written, 0);

        scheduler.transport_mut().timeout = false;
        scheduler.transport_mut().accept = Some(1);
        assert_eq!(scheduler.tick(at(2)).bytes_written, 1);

        scheduler.transport_mut().accept = None;
        assert_eq!(scheduler.tick(at(3)).bytes_written, 2);
        for ms in 4..10 {
            assert_eq!(scheduler.tick(at(ms)).bytes_written, 0);
        }

        let packets = &scheduler.transport().packets;
        assert_eq!(packets.len(), 3);
        assert_eq!(packets[1], [CMD]);
        assert_eq!(packets[2], [CMD, 5]);
        assert_eq!(scheduler.stats().partial_writes, 2);
    }

    #[test]
    fn test_preset_resends_mode_after_reconnect() {
        let config = SchedulerConfig {
            output: OutputVariant::Preset,
            ..SchedulerConfig::default()
        };
        let mut scheduler = scheduler(
            MockTransport {
                down: true,
                ..MockTransport::default()
            },
            &config,
        );
        scheduler.tick(at(0));
        scheduler.tick(at(1));
        assert!(scheduler.transport().packets.is_empty());

        scheduler.input_mut().tap(keys::F5);
        assert_eq!(scheduler.tick(at(2)).bytes_written, 2);
        assert_eq!(scheduler.transport().packets[0], [CMD, 0]);
    }

    #[test]
    fn test_one_audio_sample_per_tick() {
        let mut scheduler = streaming(MockTransport::default());
        scheduler.audio_mut().0.extend([0, 0]);

        scheduler.tick(at(0));
        assert_eq!(scheduler.audio_mut().0.len(), 1);
        assert!(scheduler.engine().audio_level() < 1.0);
    }

    #[test]
    fn test_keys_through_channel() {
        let channel = KeyChannel::<8>::new();
        let mut scheduler = FrameScheduler::new(
            Engine::new(&EngineConfig::default(), at(0)),
            channel.receiver(),
            ScriptedAudio::default(),
            MockTransport::default(),
            &SchedulerConfig::default(),
        );

        let sender = channel.sender();
        sender.try_send(KeyEvent::press(b'2')).unwrap();
        sender.try_send(KeyEvent::press(b'Q')).unwrap();
        scheduler.tick(at(0));

        assert!(channel.is_empty());
        let packet = &scheduler.transport().packets[0];
        assert_eq!(&packet[2..5], &[0, 255, 0]);
    }
}
