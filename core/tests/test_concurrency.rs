mod common;

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use zdict_core::boundary::{CallStatus, CompressionService};
    use zdict_core::compression::DictionaryRegistry;
    use zdict_core::constants::SENTINEL_LEN;

    use crate::common::{raw_dictionary, themed_payload, ProbeCodec};

    const WRITERS: usize = 3;
    const READERS: usize = 6;
    const RELEASERS: usize = 2;

    #[test]
    fn churn_with_zstd_never_returns_wrong_bytes() {
        let service = CompressionService::new();
        let raw = raw_dictionary("churn");
        let payload = themed_payload("churn");

        crossbeam::scope(|s| {
            for _ in 0..WRITERS {
                s.spawn(|_| {
                    for _ in 0..100 {
                        service.add_dictionary_bytes("x", &raw).unwrap();
                    }
                });
            }
            for _ in 0..READERS {
                s.spawn(|_| {
                    for _ in 0..300 {
                        let compressed = service.compress_with_dictionary(&payload, "x");
                        match compressed.status() {
                            CallStatus::Ok => {
                                let restored = service.decompress_with_dictionary(compressed.data(), "x");
                                match restored.status() {
                                    CallStatus::Ok => assert_eq!(restored.data(), payload.as_slice()),
                                    CallStatus::MissingDictionary => assert!(restored.is_empty()),
                                    other => panic!("unexpected status {other:?}"),
                                }
                            }
                            CallStatus::MissingDictionary => assert_eq!(compressed.len(), SENTINEL_LEN),
                            other => panic!("unexpected status {other:?}"),
                        }
                    }
                });
            }
            for _ in 0..RELEASERS {
                s.spawn(|_| {
                    for _ in 0..100 {
                        service.release_dictionaries();
                    }
                });
            }
        })
        .unwrap();

        service.release_dictionaries();
        assert!(service.registry().is_empty());
    }

    #[test]
    fn churn_frees_every_form_exactly_once() {
        let (codec, probe) = ProbeCodec::new();
        let service = CompressionService::from_registry(Arc::new(DictionaryRegistry::new(Arc::new(codec))));
        let raw = raw_dictionary("probe");

        crossbeam::scope(|s| {
            for _ in 0..WRITERS {
                s.spawn(|_| {
                    for _ in 0..200 {
                        service.add_dictionary_bytes("x", &raw).unwrap();
                    }
                });
            }
            for _ in 0..READERS {
                s.spawn(|_| {
                    for i in 0..500u32 {
                        let input = i.to_le_bytes();
                        let compressed = service.compress_with_dictionary(&input, "x");
                        if compressed.is_ok() {
                            let restored = service.decompress_with_dictionary(compressed.data(), "x");
                            assert!(restored.is_ok() || restored.status() == CallStatus::MissingDictionary);
                            if restored.is_ok() {
                                assert_eq!(restored.data(), &input);
                            }
                        }
                    }
                });
            }
            for _ in 0..RELEASERS {
                s.spawn(|_| {
                    for _ in 0..200 {
                        service.release_dictionaries();
                    }
                });
            }
        })
        .unwrap();

        service.release_dictionaries();
        let added = service.stats().dictionaries.added as usize;
        assert_eq!(added, WRITERS * 200);
        assert_eq!(probe.live(), 0, "compiled forms leaked");
        assert_eq!(probe.dropped_forms.load(Ordering::SeqCst), added * 2);
    }

    #[test]
    fn debug_toggle_races_with_calls() {
        let service = CompressionService::new();
        crossbeam::scope(|s| {
            s.spawn(|_| {
                for i in 0..1000 {
                    service.set_debug(i % 2 == 0);
                }
            });
            for _ in 0..4 {
                s.spawn(|_| {
                    for _ in 0..200 {
                        let compressed = service.compress(b"hello world");
                        assert_eq!(service.decompress(compressed.data()).data(), b"hello world");
                    }
                });
            }
        })
        .unwrap();
    }
}
