//! Per-element BEM record with block inheritance.

use crate::classify::{BemValue, ClassifiedAttr, Role};
use std::rc::Rc;

/// The resolved inputs for one element.
///
/// `block` is shared with the ancestor it was inherited from; every other
/// field belongs to this element alone.
#[derive(Debug, Clone, PartialEq)]
pub struct BemRecord {
    pub block: Option<Rc<BemValue>>,
    pub elem: Option<BemValue>,
    pub mods: Option<BemValue>,
    pub class_name: Option<BemValue>,
    /// No local `block` attribute; `block` is the ancestor's.
    pub is_block_inherited: bool,
    /// No local `block`, `elem` or `mods` attribute.
    pub is_class_name_only: bool,
}

impl BemRecord {
    /// Whether the element itself declared any BEM attribute.
    pub fn has_local_declarations(&self) -> bool {
        !self.is_block_inherited
            || self.elem.is_some()
            || self.mods.is_some()
            || self.class_name.is_some()
    }
}

/// Fold accepted attributes into a record seeded with `inherited_block`.
/// A repeated attribute overwrites the earlier one.
pub fn build_record(accepted: Vec<ClassifiedAttr>, inherited_block: Option<Rc<BemValue>>) -> BemRecord {
    let mut record = BemRecord {
        block: inherited_block,
        elem: None,
        mods: None,
        class_name: None,
        is_block_inherited: true,
        is_class_name_only: true,
    };

    for attr in accepted {
        match attr.role {
            Role::Block => {
                record.block = Some(Rc::new(attr.value));
                record.is_block_inherited = false;
                record.is_class_name_only = false;
            }
            Role::Elem => {
                record.elem = Some(attr.value);
                record.is_class_name_only = false;
            }
            Role::Mods => {
                record.mods = Some(attr.value);
                record.is_class_name_only = false;
            }
            Role::ClassName => record.class_name = Some(attr.value),
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Provenance;

    fn attr(role: Role, value: &str) -> ClassifiedAttr {
        ClassifiedAttr {
            role,
            value: BemValue::StringLiteral(value.to_string()),
            prov: Provenance::default(),
        }
    }

    fn s(value: &str) -> BemValue {
        BemValue::StringLiteral(value.to_string())
    }

    #[test]
    fn inherits_block_by_reference() {
        let parent = Rc::new(s("card"));
        let record = build_record(vec![attr(Role::Elem, "title")], Some(Rc::clone(&parent)));
        assert!(record.is_block_inherited);
        assert!(!record.is_class_name_only);
        assert!(Rc::ptr_eq(record.block.as_ref().unwrap(), &parent));
        assert_eq!(record.elem, Some(s("title")));
    }

    #[test]
    fn local_block_severs_inheritance() {
        let parent = Rc::new(s("card"));
        let record = build_record(vec![attr(Role::Block, "menu")], Some(parent));
        assert!(!record.is_block_inherited);
        assert_eq!(record.block.as_deref(), Some(&s("menu")));
    }

    #[test]
    fn class_name_only_tracking() {
        let record = build_record(vec![attr(Role::ClassName, "x")], None);
        assert!(record.is_class_name_only);
        assert!(record.has_local_declarations());

        let record = build_record(vec![attr(Role::ClassName, "x"), attr(Role::Mods, "m")], None);
        assert!(!record.is_class_name_only);
    }

    #[test]
    fn nothing_local_with_inherited_block() {
        let record = build_record(vec![], Some(Rc::new(s("card"))));
        assert!(record.is_block_inherited);
        assert!(!record.has_local_declarations());
    }

    #[test]
    fn last_duplicate_wins() {
        let record = build_record(vec![attr(Role::Elem, "a"), attr(Role::Elem, "b")], None);
        assert_eq!(record.elem, Some(s("b")));
    }
}
