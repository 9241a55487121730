use laser_defender::audio::{music_loop, tone, Audio, SoundBank, SoundEvent, AMPLITUDE};

#[test]
fn tone_length_matches_duration() {
    assert_eq!(tone(440.0, 1000, 22_050).len(), 22_050);
    assert_eq!(tone(440.0, 100, 22_050).len(), 2_205);
    assert!(tone(440.0, 0, 22_050).is_empty());
}

#[test]
fn tone_starts_at_zero_and_stays_within_amplitude() {
    let samples = tone(880.0, 50, 44_100);
    assert_eq!(samples[0], 0);
    let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap();
    assert!(f32::from(peak) <= AMPLITUDE);
    assert!(f32::from(peak) > AMPLITUDE * 0.9);
}

#[test]
fn tone_quarter_period_hits_peak() {
    // 1 kHz at 4 kHz sampling: samples are sin(0), sin(π/2), sin(π), ...
    let samples = tone(1000.0, 1, 4000);
    assert_eq!(samples.len(), 4);
    assert_eq!(samples[1], AMPLITUDE as i16);
}

#[test]
fn bank_clips_follow_event_specs() {
    let bank = SoundBank::generate(22_050);
    for event in [SoundEvent::Shoot, SoundEvent::Hit, SoundEvent::GameOver] {
        let (freq, ms) = event.tone_spec();
        assert_eq!(bank.clip(event), tone(freq, ms, 22_050).as_slice());
    }
    assert_eq!(bank.music, music_loop(22_050));
}

#[test]
fn silent_audio_is_a_no_op() {
    let mut audio = Audio::silent();
    assert!(!audio.is_available());
    audio.play(SoundEvent::Shoot);
    audio.set_music(true);
    assert!(audio.music_on());
    audio.set_music(false);
    assert!(!audio.music_on());
}
