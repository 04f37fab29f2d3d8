//! Integration tests for gtpm
//!
//! Tests the pipeline from configuration to tablature and audio.

use gtpm::synth::{write_wav, SynthParams};
use gtpm::{generate_exercise, make_tab, ExerciseConfig, GtpmError, Note};

fn fixed_config() -> ExerciseConfig {
    ExerciseConfig {
        shuffle_fingers: false,
        ..Default::default()
    }
}

#[test]
fn test_standard_single_position() {
    let config = ExerciseConfig {
        first_fret: 1,
        last_fret: 1,
        ..fixed_config()
    };
    let exercise = generate_exercise(&config).unwrap();
    assert_eq!(exercise.notes.len(), 24);

    let groups: Vec<(usize, Vec<u32>)> = exercise
        .notes
        .chunks(4)
        .map(|g| (g[0].string_index, g.iter().map(|n| n.fret).collect()))
        .collect();
    let expected: Vec<(usize, Vec<u32>)> =
        (0..6).rev().map(|s| (s, vec![1, 2, 3, 4])).collect();
    assert_eq!(groups, expected);
}

#[test]
fn test_default_exercise_tab() {
    let config = ExerciseConfig {
        seed: Some(2013),
        ..Default::default()
    };
    let tab = make_tab(&config).unwrap();

    let staves: Vec<&str> = tab.split("\n\n").filter(|s| !s.is_empty()).collect();
    assert!(staves.len() > 1);
    for staff in &staves {
        let rows: Vec<&str> = staff.lines().collect();
        assert_eq!(rows.len(), 6);
        let len = rows[0].len();
        assert!(len <= 79);
        assert!(rows.iter().all(|r| r.len() == len));
        assert!(rows[0].starts_with("E5|-"));
        assert!(rows[5].starts_with("E3|-"));
    }
    assert!(staves.last().unwrap().lines().all(|r| r.ends_with("-||")));
}

#[test]
fn test_seed_makes_tab_reproducible() {
    let config = ExerciseConfig {
        seed: Some(99),
        shuffle_per_string: true,
        ..Default::default()
    };
    assert_eq!(make_tab(&config).unwrap(), make_tab(&config).unwrap());
}

#[test]
fn test_yaml_config_pipeline() {
    let yaml = r#"
tuning: G4 D4 A3 E3
first-fret: 5
last-fret: 6
fingers: [0, 2]
width: 30
shuffle-fingers: false
"#;
    let config = ExerciseConfig::from_yaml(yaml).unwrap();
    let exercise = generate_exercise(&config).unwrap();
    assert_eq!(exercise.notes.len(), 2 * 4 * 2);
    // fret 5 is odd: last string first
    assert_eq!(exercise.notes[0], Note::new(3, 5));
    assert_eq!(exercise.notes[1], Note::new(3, 7));
    // fret 6 is even: first string first, fingers mirrored
    assert_eq!(exercise.notes[8], Note::new(0, 8));
    assert_eq!(exercise.notes[9], Note::new(0, 6));

    let tab = exercise.tab(config.width).unwrap();
    for line in tab.lines() {
        assert!(line.len() <= 30);
    }
}

#[test]
fn test_invalid_config_reported() {
    let result = ExerciseConfig::from_yaml("first-fret: 9\nlast-fret: 3\n");
    assert!(matches!(result, Err(GtpmError::ConfigError(_))));

    let config = ExerciseConfig {
        width: 5,
        ..fixed_config()
    };
    assert!(matches!(make_tab(&config), Err(GtpmError::RenderError(_))));
}

#[test]
fn test_audio_to_wav_file() {
    let config = ExerciseConfig {
        first_fret: 1,
        last_fret: 1,
        fingers: vec![0],
        starting_beats: 1,
        sample_rate: 8000,
        seed: Some(5),
        ..fixed_config()
    };
    let exercise = generate_exercise(&config).unwrap();
    let audio = exercise.synthesize(&SynthParams::from_config(&config)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exercise.wav");
    write_wav(&path, &audio).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_rate, 8000);
    assert_eq!(reader.len() as usize, audio.samples.len());
}
