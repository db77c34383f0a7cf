use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BodyType;
use crate::state::SelectionStore;

pub fn run(store: &mut SelectionStore, tag: &str) -> Result<CmdResult> {
    let body_type: BodyType = tag.parse()?;
    let mut result = CmdResult::default();

    if store.body_type() == body_type {
        result.add_message(CmdMessage::info(format!("Body type is already {}", body_type)));
    } else {
        store.set_body_type(body_type);
        result.add_message(CmdMessage::success(format!("Body type set to {}", body_type)));
    }

    Ok(result.with_state(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpriteError;

    #[test]
    fn sets_known_tag() {
        let mut store = SelectionStore::default();
        let result = run(&mut store, "muscular").unwrap();
        assert_eq!(store.body_type(), BodyType::Muscular);
        assert_eq!(result.body_type, Some(BodyType::Muscular));
    }

    #[test]
    fn rejects_unknown_tag() {
        let mut store = SelectionStore::default();
        let err = run(&mut store, "Male").unwrap_err();
        assert!(matches!(err, SpriteError::InvalidBodyType(_)));
        assert_eq!(store.body_type(), BodyType::Male);
    }
}
