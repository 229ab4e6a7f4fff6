//! Performance benchmarks for environment stepping
//!
//! Run with: cargo bench --bench step_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gestalt_env::{EnvConfig, ProbeEnv, ScriptedSource, SentenceEnv, VocabTables, Vocabulary};

fn vocab() -> Vocabulary {
    Vocabulary::new(VocabTables {
        words: [
            "start", "was", "by", "schoolgirl", "stirred", "koolaid", "spoon", "busdriver",
            "ate", "steak",
        ]
        .map(String::from)
        .to_vec(),
        roles: ["Agent", "Action", "Patient", "Instrument"]
            .map(String::from)
            .to_vec(),
        fillers: [
            "None",
            "Schoolgirl",
            "Stirred",
            "Koolaid",
            "Spoon",
            "BusDriver",
            "Ate",
            "Steak",
        ]
        .map(String::from)
        .to_vec(),
        ..VocabTables::default()
    })
}

const CORPUS: &str = "\
schoolgirl stirred koolaid spoon
Agent = Schoolgirl
Action = Stirred
Patient = Koolaid
Mod = Instrument
Instrument = Spoon

busdriver ate steak
Agent = BusDriver
Action = Ate
Patient = Steak
";

/// Benchmark the steady-state step loop, sentence generation included
fn bench_sentence_step(c: &mut Criterion) {
    let config = EnvConfig {
        passive_prob: 0.2,
        seed: 42,
        ..EnvConfig::default()
    };
    let source = ScriptedSource::parse(CORPUS).unwrap();
    let mut env = SentenceEnv::new(config, vocab(), Box::new(source));

    c.bench_function("sentence_step", |b| {
        b.iter(|| {
            env.step().unwrap();
            black_box(env.word_buffer());
        });
    });
}

/// Benchmark probe playback stepping
fn bench_probe_step(c: &mut Criterion) {
    let words = ["schoolgirl", "stirred", "koolaid", "spoon"]
        .map(String::from)
        .to_vec();
    let mut env = ProbeEnv::new(words, vocab());

    c.bench_function("probe_step", |b| {
        b.iter(|| {
            if env.trial() >= env.total_trials() {
                env.init(0);
            }
            env.step();
            black_box(env.word_buffer());
        });
    });
}

criterion_group!(benches, bench_sentence_step, bench_probe_step);
criterion_main!(benches);
