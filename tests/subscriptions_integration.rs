use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::*;

use tea_glue::{Cmd, Every, Glue, Sub, SubId};

/// Child module: listens to a clock while it is running
mod clock {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Msg {
        Tick,
        Toggle,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Model {
        pub running: bool,
        pub ticks: u32,
        pub period: Duration,
    }

    pub fn init(period: Duration) -> (Model, Cmd<Msg>) {
        (
            Model {
                running: true,
                ticks: 0,
                period,
            },
            Cmd::none(),
        )
    }

    pub fn update(msg: Msg, model: &Model) -> (Model, Cmd<Msg>) {
        let model = match msg {
            Msg::Tick => Model {
                ticks: model.ticks + 1,
                ..model.clone()
            },
            Msg::Toggle => Model {
                running: !model.running,
                ..model.clone()
            },
        };
        (model, Cmd::none())
    }

    pub fn subscriptions(model: &Model) -> Vec<Sub<Msg>> {
        if model.running {
            vec![Sub::new(Every(model.period)).map(|_| Msg::Tick)]
        } else {
            vec![]
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Msg {
    Left(clock::Msg),
    Right(clock::Msg),
    Slot(usize, clock::Msg),
    Redraw,
}

#[derive(Debug, Clone, PartialEq)]
struct Model {
    left: clock::Model,
    right: clock::Model,
    focus_left: bool,
}

type ClockGlue = Glue<Model, clock::Model, Msg, clock::Msg, clock::Msg>;

fn left() -> ClockGlue {
    Glue::simple(
        Msg::Left,
        |model: &Model| &model.left,
        |left, model| Model { left, ..model },
        || clock::init(Duration::from_millis(16)),
        clock::update,
        clock::subscriptions,
    )
}

fn right() -> ClockGlue {
    Glue::simple(
        Msg::Right,
        |model: &Model| &model.right,
        |right, model| Model { right, ..model },
        || clock::init(Duration::from_millis(16)),
        clock::update,
        clock::subscriptions,
    )
}

/// Same child for either side, built by one factory
fn slot(index: usize) -> ClockGlue {
    Glue::simple(
        move |msg| Msg::Slot(index, msg),
        move |model: &Model| if index == 0 { &model.left } else { &model.right },
        move |clock, model| {
            if index == 0 {
                Model { left: clock, ..model }
            } else {
                Model { right: clock, ..model }
            }
        },
        || clock::init(Duration::from_millis(16)),
        clock::update,
        clock::subscriptions,
    )
    .keyed(index)
}

fn main_subscriptions(_: &Model) -> Vec<Sub<Msg>> {
    vec![Sub::new(Every::millis(1000)).map(|_| Msg::Redraw)]
}

fn ids(subs: &[Sub<Msg>]) -> Vec<SubId> {
    subs.iter().map(Sub::id).collect()
}

#[fixture]
fn model() -> Model {
    let (model, _) = right().init(left().init((
        |left| {
            move |right| Model {
                left,
                right,
                focus_left: true,
            }
        },
        Cmd::none(),
    )));
    model
}

#[rstest]
fn test_same_child_twice_gets_distinct_ids(model: Model) {
    let subscriptions = right().subscriptions(left().subscriptions(|_| vec![]));
    let subs = subscriptions(&model);
    assert_eq!(subs.len(), 2);
    assert_ne!(subs[0].id(), subs[1].id());
}

#[rstest]
fn test_factory_built_children_get_distinct_ids(model: Model) {
    let subscriptions = slot(1).subscriptions(slot(0).subscriptions(|_| vec![]));
    let subs = subscriptions(&model);
    assert_eq!(subs.len(), 2);
    assert_ne!(subs[0].id(), subs[1].id());
    assert_eq!(ids(&subs), ids(&subscriptions(&model)));
}

#[rstest]
fn test_ids_are_stable_across_calls(model: Model) {
    let subscriptions = left().subscriptions(main_subscriptions);
    assert_eq!(ids(&subscriptions(&model)), ids(&subscriptions(&model)));
}

#[rstest]
fn test_parent_subscriptions_come_first(model: Model) {
    let subscriptions = left().subscriptions(main_subscriptions);
    let subs = subscriptions(&model);
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].id(), ids(&main_subscriptions(&model))[0]);
}

#[rstest]
fn test_never_gated_matches_main_only(model: Model) {
    let gated = left().subscriptions_when(|_| false, main_subscriptions);
    let stopped = Model {
        left: clock::Model {
            running: false,
            ..model.left.clone()
        },
        ..model.clone()
    };
    for model in [&model, &stopped] {
        assert_eq!(ids(&gated(model)), ids(&main_subscriptions(model)));
    }
}

#[rstest]
fn test_always_gated_matches_unconditional(model: Model) {
    let glue = left();
    let gated = glue.subscriptions_when(|_| true, main_subscriptions);
    let plain = glue.subscriptions(main_subscriptions);
    assert_eq!(ids(&gated(&model)), ids(&plain(&model)));
}

#[rstest]
fn test_gate_follows_focus(model: Model) {
    let glue = left();
    let subscriptions = glue.subscriptions_when(|model: &Model| model.focus_left, |_| vec![]);
    assert_eq!(subscriptions(&model).len(), 1);

    let unfocused = Model {
        focus_left: false,
        ..model
    };
    assert!(subscriptions(&unfocused).is_empty());
}

#[rstest]
fn test_child_state_drives_its_subscriptions(model: Model) {
    let glue = left();
    let subscriptions = glue.subscriptions(|_| vec![]);
    let (model, cmd) = glue.update(clock::Msg::Toggle, (model, Cmd::none()));
    assert!(cmd.is_none());
    assert!(!model.left.running);
    assert!(subscriptions(&model).is_empty());
}
