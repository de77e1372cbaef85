use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tea_glue::{Cmd, Glue};

#[derive(Debug)]
enum Msg {
    Counter(u64),
    Noop,
}

#[derive(Debug, Clone)]
struct Model {
    counter: u64,
    label: String,
}

fn counter() -> Glue<Model, u64, Msg, u64, u64> {
    Glue::simple(
        Msg::Counter,
        |model: &Model| &model.counter,
        |counter, model| Model { counter, ..model },
        || (0, Cmd::none()),
        |step, count: &u64| {
            let cmd = if step % 2 == 0 {
                Cmd::message(step)
            } else {
                Cmd::none()
            };
            (count + step, cmd)
        },
        |_| vec![],
    )
}

fn by_hand(step: u64, model: Model) -> (Model, Cmd<Msg>) {
    let cmd = if step % 2 == 0 {
        Cmd::message(Msg::Counter(step))
    } else {
        Cmd::none()
    };
    (
        Model {
            counter: model.counter + step,
            ..model
        },
        cmd,
    )
}

fn benchmark(c: &mut Criterion) {
    let glue = counter();
    let model = Model {
        counter: 0,
        label: "bench".to_string(),
    };

    c.bench_function("glue-update-chain", |b| {
        b.iter(|| {
            (0..100).fold((model.clone(), Cmd::message(Msg::Noop)), |acc, step| {
                glue.update(black_box(step), acc)
            })
        })
    });

    c.bench_function("hand-written-update-chain", |b| {
        b.iter(|| {
            (0..100).fold((model.clone(), Cmd::message(Msg::Noop)), |(model, cmd), step| {
                let (model, next) = by_hand(black_box(step), model);
                (model, cmd.and(next))
            })
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
