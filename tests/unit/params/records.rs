use super::*;
use crate::params::store::EffectStateStore;
use crate::schema::{ParamValue, Schema};

#[test]
fn every_default_set_decodes_to_its_own_variant() {
    let store = EffectStateStore::new(Schema::builtin());
    for id in EffectId::ALL {
        let effect = Effect::decode(id, store.params(id).unwrap()).unwrap();
        assert_eq!(effect.id(), id);
    }
}

#[test]
fn ascii_defaults_decode_to_expected_record() {
    let store = EffectStateStore::new(Schema::builtin());
    let Effect::Ascii(p) = Effect::decode(EffectId::Ascii, store.params(EffectId::Ascii).unwrap())
        .unwrap()
    else {
        panic!("expected ascii");
    };
    assert_eq!(p.ramp, GlyphRamp::Standard);
    assert_eq!(p.output_width, 120.0);
    assert_eq!(p.mode, GlyphColorMode::Original);
    assert!(!p.invert);
}

#[test]
fn decoding_a_set_with_missing_keys_fails() {
    let empty = ParamSet::default();
    assert!(Effect::decode(EffectId::Threshold, &empty).is_err());
    assert_eq!(
        Effect::decode(EffectId::Contour, &empty).unwrap(),
        Effect::Contour
    );
}

#[test]
fn decoding_rejects_wrong_kinds() {
    let mut p = ParamSet::default();
    p.insert_unchecked("level", ParamValue::Flag(true));
    assert!(Effect::decode(EffectId::Threshold, &p).is_err());
}
