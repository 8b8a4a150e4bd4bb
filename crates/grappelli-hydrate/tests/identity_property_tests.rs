//! Property tests pinning the identity core's contracts
//!
//! The identifier format is a persisted artifact and the resolution
//! precedence (element check → object map → text table) is part of the
//! documented behavior; these properties keep both from drifting.

use grappelli_core::{Element, Obj, Value};
use grappelli_hydrate::markers::assign_element_id;
use grappelli_hydrate::{ContainerState, idcodec};
use proptest::prelude::*;

proptest! {
	/// encode/decode recovers any integer exactly.
	#[test]
	fn prop_codec_round_trips(n in any::<u64>()) {
		let encoded = idcodec::encode(n);
		prop_assert_eq!(idcodec::decode(&encoded), Some(n));
	}

	/// Encoded identifiers only ever use lowercase base-36 digits.
	#[test]
	fn prop_codec_alphabet_is_lowercase_base36(n in any::<u64>()) {
		let encoded = idcodec::encode(n);
		prop_assert!(
			encoded
				.bytes()
				.all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
		);
	}

	/// Identifiers are issued densely, in first-request order, with no
	/// gaps and no reuse, including when values are re-requested.
	#[test]
	fn prop_allocation_is_monotonic_and_dense(count in 1usize..48) {
		let state = ContainerState::new(Element::new("div"));
		let values: Vec<Value> = (0..count).map(|_| Value::from(Obj::new())).collect();

		let mut ids = Vec::new();
		for value in &values {
			ids.push(state.add_object_root(value).expect("reference value"));
		}
		// re-registration changes nothing
		for (value, id) in values.iter().zip(&ids) {
			prop_assert_eq!(&state.add_object_root(value).expect("idempotent"), id);
		}

		let decoded: Vec<u64> = ids
			.iter()
			.map(|id| idcodec::decode(id).expect("well-formed id"))
			.collect();
		let expected: Vec<u64> = (0..count as u64).collect();
		prop_assert_eq!(decoded, expected);
	}

	/// A value present in both the object map and the text table resolves
	/// through the object map: the dedup namespace is a fallback, never an
	/// override.
	#[test]
	fn prop_object_map_precedes_text_table(literal in "[a-z]{1,16}") {
		let state = ContainerState::new(Element::new("div"));
		let text = Value::text(&literal);

		let text_id = state.intern_text(&literal);
		let object_id = state.add_object_root(&text).expect("texts have identity");

		let resolved = state.get_object_id(&text).expect("registered");
		prop_assert_eq!(&resolved, &object_id);
		prop_assert!(!resolved.starts_with('*'));

		// a distinct allocation of the same content misses the object map
		// and falls through to the dedup namespace
		let twin = Value::text(&literal);
		prop_assert_eq!(state.get_object_id(&twin), Some(format!("*{}", text_id)));
	}

	/// An element resolves through its context record even when it was
	/// also registered directly in the object map: the element check runs
	/// first.
	#[test]
	fn prop_element_check_precedes_object_map(ctx_id in "[a-z0-9]{1,8}") {
		let state = ContainerState::new(Element::new("div"));
		let element = Element::new("li");
		assign_element_id(&element, ctx_id.as_str());
		let value = Value::from(element);

		state.add_object_root(&value).expect("elements have identity");

		let resolved = state.get_object_id(&value).expect("resolves");
		prop_assert_eq!(resolved, format!("#{}", ctx_id));
	}
}
