use std::collections::HashSet;

use super::*;
use crate::dom::parse_selector;
use crate::error::ErrorKind;
use crate::overlay::OverlayAction;

#[test]
fn resolves_known_store() {
    let adapter = resolve("newegg").unwrap();
    assert_eq!(adapter.store_id, "newegg");
    assert_eq!(adapter.variant, AdapterVariant::StandardDom);
    assert_eq!(adapter.wait_policy(), WaitPolicy::ContentLoaded);
}

#[test]
fn gated_stores_wait_for_network_idle() {
    let adapter = resolve("bestbuy-ca").unwrap();
    assert_eq!(adapter.variant, AdapterVariant::GatedSpa);
    assert_eq!(adapter.wait_policy(), WaitPolicy::NetworkIdle);
    assert_eq!(adapter.overlays.len(), 2);
    assert_eq!(adapter.overlays[1].action, OverlayAction::ClickNth(1));
}

#[test]
fn unknown_store_is_configuration_error() {
    let err = resolve("frys").unwrap_err();
    assert!(matches!(err, ScrapeError::UnknownStore { ref store_id } if store_id == "frys"));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn store_ids_are_unique() {
    let ids: Vec<_> = known_store_ids().collect();
    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
}

#[test]
fn standard_dom_adapters_have_no_overlays() {
    for id in known_store_ids() {
        let adapter = resolve(id).unwrap();
        if adapter.variant == AdapterVariant::StandardDom {
            assert!(adapter.overlays.is_empty(), "{id} declares overlays");
        }
    }
}

#[test]
fn every_selector_parses() {
    for id in known_store_ids() {
        let adapter = resolve(id).unwrap();
        let rules = adapter.rules;
        let mut selectors = vec![
            adapter.readiness_query,
            rules.container,
            rules.title,
            rules.price,
            rules.availability,
        ];
        selectors.extend(adapter.overlays.iter().map(|o| o.detect_query));
        for selector in selectors {
            assert!(parse_selector(selector).is_ok(), "{id}: {selector}");
        }
    }
}

#[test]
fn every_configured_store_has_an_adapter() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/stores.yaml");
    let stores = skuwatch_core::load_stores(std::path::Path::new(path)).unwrap();
    for profile in &stores.stores {
        assert!(resolve(&profile.id).is_ok(), "no adapter for {}", profile.id);
    }
}
