//! Address grammar scenarios as the compiler front end sees them.
//!
//! Covers the literal segmentation cases, extension rules and the interplay
//! between addresses and reference paths while walking an instance tree.

use ato::base::{self, AddrStr, AddressError};
use ato::hir::{FieldRef, ReferencePart, TypeRef};
use rstest::rstest;

// ============================================================================
// SEGMENTATION
// ============================================================================

#[rstest]
#[case("path/to/file.ato:Entry::instance", "path/to/file.ato", "Entry", "instance")]
#[case("file.ato:Module.Entry::instance", "file.ato", "Module.Entry", "instance")]
#[case("file.ato:Entry::instance.path", "file.ato", "Entry", "instance.path")]
#[case("file.ato:Module", "file.ato", "Module", "")]
#[case("file.ato", "file.ato", "", "")]
#[case("", "", "", "")]
fn test_sections(
    #[case] raw: &str,
    #[case] file: &str,
    #[case] entry: &str,
    #[case] instance: &str,
) {
    let addr = AddrStr::from(raw);
    assert_eq!(addr.file(), file);
    assert_eq!(addr.entry_section(), entry);
    assert_eq!(addr.instance_section(), instance);
}

#[test]
fn test_malformed_addresses_segment_without_failing() {
    // A lone colon before the instance puts it in the entry slot.
    let addr = AddrStr::from("file.ato:Entry:inst");
    assert_eq!(addr.entry_section(), "Entry");
    assert_eq!(addr.instance_section(), "");

    // Leading colon: empty file, entry still reachable.
    let addr = AddrStr::from(":Entry::inst");
    assert_eq!(addr.file(), "");
    assert_eq!(addr.entry_section(), "Entry");
    assert_eq!(addr.instance_section(), "inst");
}

#[test]
fn test_from_parts_then_accessors() {
    for (file, entry, instance) in [
        ("main.ato", "App", ""),
        ("main.ato", "App.Power", "reg.cap"),
        ("lib/parts.ato", "Resistor", "r1"),
    ] {
        let addr = AddrStr::from_parts(file, entry, instance);
        assert_eq!(addr.file(), file);
        assert_eq!(addr.entry_section(), entry);
        assert_eq!(addr.instance_section(), instance);
    }
}

// ============================================================================
// EXTENSION
// ============================================================================

#[test]
fn test_instances_fold_matches_chain() {
    let addr = AddrStr::from("main.ato:App");
    let folded = addr.add_instances(["a", "b"]).unwrap();
    let chained = addr.add_instance("a").unwrap().add_instance("b").unwrap();
    assert_eq!(folded, chained);
}

#[test]
fn test_entries_fold_matches_chain() {
    let addr = AddrStr::from("main.ato");
    let folded = addr.add_entries(["A", "B", "C"]).unwrap();
    let chained = addr
        .add_entry("A")
        .and_then(|a| a.add_entry("B"))
        .and_then(|a| a.add_entry("C"))
        .unwrap();
    assert_eq!(folded, chained);
    assert_eq!(folded, "main.ato:A.B.C");
}

#[test]
fn test_entry_after_instance_always_fails() {
    let addr = AddrStr::from("main.ato:App::power");
    for name in ["X", "Y.Z", ""] {
        assert!(matches!(addr.add_entry(name), Err(AddressError::Grammar(_))));
    }
}

#[test]
fn test_instance_without_entry_always_fails() {
    for raw in ["main.ato", "", "dir/file.ato"] {
        let addr = AddrStr::from(raw);
        assert!(matches!(addr.add_instance("x"), Err(AddressError::Grammar(_))));
    }
}

#[test]
fn test_fold_stops_at_first_error() {
    let addr = AddrStr::from("main.ato:App");
    let err = addr
        .add_entries(["Power"])
        .and_then(|a| a.add_instances(["reg"]))
        .and_then(|a| a.add_entries(["Late", "Later"]))
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot add entry to an instance address");
}

#[test]
fn test_free_functions() {
    let addr = base::from_parts("main.ato", "App", "");
    let addr = base::add_instances(&addr, ["power", "reg"]).unwrap();
    assert_eq!(base::get_instance_section(&addr), "power.reg");
    assert_eq!(base::get_entry(&addr), "main.ato:App");
    assert_eq!(base::get_name(&addr), "reg");
}

// ============================================================================
// RELATIVIZATION
// ============================================================================

#[test]
fn test_relative_addr_keeps_sections() {
    let addr = AddrStr::from("/home/u/proj/elec/src/main.ato:App.Board::power.reg");
    let rel = base::get_relative_addr_str(&addr, "/home/u/proj").unwrap();
    assert_eq!(rel.file(), "elec/src/main.ato");
    assert_eq!(rel.entry_section(), addr.entry_section());
    assert_eq!(rel.instance_section(), addr.instance_section());
}

#[test]
fn test_relative_addr_to_sibling_dir() {
    let addr = AddrStr::from("/proj/lib/parts.ato:Resistor");
    let rel = addr.relative_to("/proj/elec").unwrap();
    assert_eq!(rel, "../lib/parts.ato:Resistor");
}

// ============================================================================
// ELABORATION WALK
// ============================================================================

#[test]
fn test_walk_instance_tree() {
    let root = AddrStr::from("main.ato").add_entry_ref(&TypeRef::from("App")).unwrap();
    let mut path = FieldRef::empty();
    let mut seen = Vec::new();

    for part in [
        ReferencePart::named("power"),
        ReferencePart::indexed("caps", 0),
        ReferencePart::indexed("caps", 1),
    ] {
        let child = path.append(part);
        seen.push(root.add_instance_ref(&child).unwrap());
        if !child.last().is_some_and(ReferencePart::has_key) {
            path = child;
        }
    }

    assert_eq!(
        seen,
        vec![
            AddrStr::from("main.ato:App::power"),
            AddrStr::from("main.ato:App::power.caps[0]"),
            AddrStr::from("main.ato:App::power.caps[1]"),
        ]
    );
    assert_eq!(seen[2].instance_ref().stem(), FieldRef::parse("power").unwrap());
}

#[test]
fn test_type_ref_lift_and_downgrade() {
    let type_ref = TypeRef::from_path_str("App.Power.Regulator");
    let lifted = FieldRef::from_type_ref(&type_ref);
    assert_eq!(lifted.to_type_ref(), Some(type_ref.clone()));
    assert_eq!(FieldRef::from(type_ref.clone()), lifted);

    let indexed = lifted.append(ReferencePart::indexed("caps", 2));
    assert!(indexed.to_type_ref().is_none());
    assert_eq!(indexed.stem().to_type_ref(), Some(type_ref));
}
