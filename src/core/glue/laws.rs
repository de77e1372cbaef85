//! Checks for hand-written glue
//!
//! Nothing in [`Glue`] can enforce that `get` and `set` agree or that `wrap`
//! keeps child messages apart. These helpers let a test suite assert it.

use std::fmt::Debug;

use thiserror::Error;

use super::Glue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LawViolation {
    /// `get(set(s, p))` did not return `s`
    #[error("get after set returned {actual}, expected {expected}")]
    SetGet { expected: String, actual: String },
    /// `set(get(p), p)` did not return `p`
    #[error("set of the current child model changed the parent: {actual}, expected {expected}")]
    GetSet { expected: String, actual: String },
    /// Two different child values were wrapped into equal parent messages
    #[error("wrap maps both {left} and {right} to {wrapped}")]
    WrapCollision {
        left: String,
        right: String,
        wrapped: String,
    },
}

/// Verify both lens laws for one parent model and one child model
pub fn check_lens<M, S, Msg, SubMsg, A>(
    glue: &Glue<M, S, Msg, SubMsg, A>,
    model: &M,
    sub_model: &S,
) -> Result<(), LawViolation>
where
    M: Clone + PartialEq + Debug,
    S: Clone + PartialEq + Debug,
{
    let updated = glue.set(sub_model.clone(), model.clone());
    let actual = glue.get(&updated);
    if actual != sub_model {
        return Err(LawViolation::SetGet {
            expected: format!("{sub_model:?}"),
            actual: format!("{actual:?}"),
        });
    }

    let reinstalled = glue.set(glue.get(model).clone(), model.clone());
    if &reinstalled != model {
        return Err(LawViolation::GetSet {
            expected: format!("{model:?}"),
            actual: format!("{reinstalled:?}"),
        });
    }

    Ok(())
}

/// Verify that two distinct child values stay distinguishable once wrapped
pub fn check_wrap_distinct<M, S, Msg, SubMsg, A>(
    glue: &Glue<M, S, Msg, SubMsg, A>,
    left: &A,
    right: &A,
) -> Result<(), LawViolation>
where
    A: Clone + PartialEq + Debug,
    Msg: PartialEq + Debug,
{
    if left == right {
        return Ok(());
    }
    let wrapped = glue.wrap(left.clone());
    if wrapped == glue.wrap(right.clone()) {
        return Err(LawViolation::WrapCollision {
            left: format!("{left:?}"),
            right: format!("{right:?}"),
            wrapped: format!("{wrapped:?}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::cmd::Cmd;

    #[derive(Debug, Clone, PartialEq)]
    struct Model {
        name: String,
        visits: u32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Name(String),
        Ignored,
    }

    fn model() -> Model {
        Model {
            name: "alice".to_string(),
            visits: 3,
        }
    }

    fn glue_with_set<St>(set: St) -> Glue<Model, String, Msg, String, String>
    where
        St: Fn(String, Model) -> Model + Send + Sync + 'static,
    {
        Glue::simple(
            Msg::Name,
            |model: &Model| &model.name,
            set,
            || (String::new(), Cmd::none()),
            |name, _: &String| (name, Cmd::none()),
            |_| vec![],
        )
    }

    #[test]
    fn test_lawful_lens() {
        let glue = glue_with_set(|name, model| Model { name, ..model });
        assert_eq!(check_lens(&glue, &model(), &"bob".to_string()), Ok(()));
    }

    #[test]
    fn test_set_get_violation() {
        let glue = glue_with_set(|_, model| model);
        let result = check_lens(&glue, &model(), &"bob".to_string());
        assert!(matches!(result, Err(LawViolation::SetGet { .. })));
    }

    #[test]
    fn test_get_set_violation() {
        let glue = glue_with_set(|name, model| Model {
            name,
            visits: model.visits + 1,
        });
        let result = check_lens(&glue, &model(), &"bob".to_string());
        assert!(matches!(result, Err(LawViolation::GetSet { .. })));
    }

    #[test]
    fn test_wrap_distinct() {
        let glue = glue_with_set(|name, model| Model { name, ..model });
        assert_eq!(
            check_wrap_distinct(&glue, &"a".to_string(), &"b".to_string()),
            Ok(())
        );
    }

    #[test]
    fn test_wrap_collision() {
        let glue: Glue<Model, String, Msg, String, String> = Glue::new(
            |_: String| Msg::Ignored,
            |model: &Model| &model.name,
            |name, model| Model { name, ..model },
            || (String::new(), Cmd::none()),
            |name, _: &Model| (name, Cmd::none()),
            |_| vec![],
        );
        let err = check_wrap_distinct(&glue, &"a".to_string(), &"b".to_string())
            .expect_err("constant wrap must collide");
        assert_eq!(
            err.to_string(),
            r#"wrap maps both "a" and "b" to Ignored"#
        );
    }
}
