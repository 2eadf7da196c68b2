//! Benchmark: compile a long generated protocol, and frame the result into an artifact.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ctp::{compile_source, read_artifact};

fn generated_protocol(steps: usize) -> String {
    let mut src = String::from("# generated\ngnd 8 12\nvin 5 16\n");
    for i in 0..steps {
        let pin = i % 16 + 1;
        let other = (i * 7) % 16 + 1;
        if pin == other {
            src.push_str(&format!("set on {} off rest\n", pin));
        } else {
            src.push_str(&format!("set on {} off {}\n", pin, other));
        }
        src.push_str(&format!("delay {}\n", i % 1000));
        src.push_str("check on 1 2 3 4 off rest\n");
    }
    src
}

fn bench_compile(c: &mut Criterion) {
    let src = generated_protocol(2_000);

    c.bench_function("compile_source 6k lines", |b| {
        b.iter(|| compile_source(black_box(&src)).expect("compile"))
    });

    let program = compile_source(&src).expect("compile").program;
    c.bench_function("to_artifact", |b| b.iter(|| black_box(&program).to_artifact()));

    let bytes = program.to_artifact();
    c.bench_function("read_artifact", |b| {
        b.iter(|| read_artifact(black_box(&bytes)).expect("read"))
    });
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
