use super::*;
use std::collections::HashSet;

#[test]
fn catalog_lists_every_effect_in_display_order() {
    let schema = Schema::builtin();
    let ids: Vec<EffectId> = schema.effects().iter().map(|e| e.id).collect();
    assert_eq!(ids, EffectId::ALL.to_vec());
}

#[test]
fn control_keys_are_unique_per_effect() {
    for effect in Schema::builtin().effects() {
        let mut seen = HashSet::new();
        for c in &effect.controls {
            assert!(seen.insert(c.key), "{}: duplicate key {}", effect.id, c.key);
        }
    }
}

#[test]
fn every_default_is_inside_its_domain() {
    for effect in Schema::builtin().effects() {
        for c in &effect.controls {
            c.validate(&c.default)
                .unwrap_or_else(|e| panic!("{}.{}: {e}", effect.id, c.key));
        }
    }
}

#[test]
fn effect_ids_round_trip_through_strings() {
    for id in EffectId::ALL {
        assert_eq!(id.as_str().parse::<EffectId>().unwrap(), id);
    }
    assert!("sepia".parse::<EffectId>().is_err());
}

#[test]
fn only_animated_effects_are_time_dependent() {
    let animated: Vec<EffectId> = EffectId::ALL
        .into_iter()
        .filter(|id| id.is_time_dependent())
        .collect();
    assert_eq!(
        animated,
        vec![EffectId::Matrix, EffectId::WaveLines, EffectId::Vhs]
    );
}

#[test]
fn validate_rejects_out_of_domain_values() {
    let threshold = Schema::builtin().effect(EffectId::Threshold).unwrap();
    let level = threshold.control("level").unwrap();
    assert!(level.validate(&ParamValue::Number(300.0)).is_err());
    assert!(level.validate(&ParamValue::Number(f64::NAN)).is_err());
    assert!(level.validate(&ParamValue::Flag(true)).is_err());
    assert!(level.validate(&ParamValue::Number(255.0)).is_ok());

    let dots = Schema::builtin().effect(EffectId::Dots).unwrap();
    let shape = dots.control("shape").unwrap();
    assert!(shape.validate(&ParamValue::Choice("Hexagon".into())).is_err());
    assert!(shape.validate(&ParamValue::Choice("Square".into())).is_ok());
}

#[test]
fn contour_has_no_controls() {
    assert!(
        Schema::builtin()
            .effect(EffectId::Contour)
            .unwrap()
            .controls
            .is_empty()
    );
}

#[test]
fn glyph_ramps_resolve_by_name() {
    for ramp in ramps::GlyphRamp::ALL {
        assert_eq!(ramps::GlyphRamp::from_name(ramp.name()).unwrap(), ramp);
        assert!(ramp.glyphs().len() > 1);
    }
    assert_eq!(ramps::ramp_index(0.0, 10), 0);
    assert_eq!(ramps::ramp_index(255.0, 10), 9);
}
