use super::*;

fn store() -> EffectStateStore {
    EffectStateStore::new(Schema::builtin())
}

#[test]
fn key_sets_match_schema_for_every_effect() {
    let s = store();
    for desc in Schema::builtin().effects() {
        let expected: Vec<&str> = {
            let mut k: Vec<&str> = desc.controls.iter().map(|c| c.key).collect();
            k.sort_unstable();
            k
        };
        let params: Vec<&str> = s.params(desc.id).unwrap().keys().collect();
        let defaults: Vec<&str> = s.defaults(desc.id).unwrap().keys().collect();
        assert_eq!(params, expected, "{}", desc.id);
        assert_eq!(defaults, expected, "{}", desc.id);
    }
}

#[test]
fn set_validates_and_leaves_store_untouched_on_error() {
    let mut s = store();
    s.set(EffectId::Threshold, "level", ParamValue::Number(200.0))
        .unwrap();
    assert_eq!(s.params(EffectId::Threshold).unwrap().number("level").unwrap(), 200.0);

    assert!(
        s.set(EffectId::Threshold, "level", ParamValue::Number(999.0))
            .is_err()
    );
    assert!(
        s.set(EffectId::Threshold, "bogus", ParamValue::Number(1.0))
            .is_err()
    );
    let p = s.params(EffectId::Threshold).unwrap();
    assert_eq!(p.number("level").unwrap(), 200.0);
    assert_eq!(p.len(), 1);
}

#[test]
fn reset_restores_defaults() {
    let mut s = store();
    s.set_str(EffectId::Vhs, "shift", "12").unwrap();
    s.set_str(EffectId::Vhs, "jitter", "0").unwrap();
    s.reset_param(EffectId::Vhs, "shift").unwrap();
    assert_eq!(s.params(EffectId::Vhs).unwrap().number("shift").unwrap(), 7.0);
    assert_eq!(s.params(EffectId::Vhs).unwrap().number("jitter").unwrap(), 0.0);

    s.reset_effect(EffectId::Vhs).unwrap();
    assert_eq!(s.params(EffectId::Vhs).unwrap(), s.defaults(EffectId::Vhs).unwrap());
}

#[test]
fn set_str_parses_by_control_kind() {
    let mut s = store();
    s.set_str(EffectId::Dots, "invert", "on").unwrap();
    s.set_str(EffectId::Dots, "shape", "Square").unwrap();
    s.set_str(EffectId::Edge, "lineColor", "#ff0000").unwrap();
    assert!(s.params(EffectId::Dots).unwrap().flag("invert").unwrap());
    assert_eq!(s.params(EffectId::Dots).unwrap().choice("shape").unwrap(), "Square");
    assert_eq!(
        s.params(EffectId::Edge).unwrap().color("lineColor").unwrap(),
        Rgb8::new(255, 0, 0)
    );
    assert!(s.set_str(EffectId::Dots, "invert", "maybe").is_err());
}

#[test]
fn apply_json_overrides() {
    let mut s = store();
    let json = serde_json::json!({ "amp": 20, "freq": 0.02 });
    s.apply_json(EffectId::WaveLines, &json).unwrap();
    let p = s.params(EffectId::WaveLines).unwrap();
    assert_eq!(p.number("amp").unwrap(), 20.0);
    assert_eq!(p.number("freq").unwrap(), 0.02);

    let bad = serde_json::json!({ "amp": "loud" });
    assert!(s.apply_json(EffectId::WaveLines, &bad).is_err());
}

#[test]
fn typed_getters_reject_wrong_kinds() {
    let s = store();
    let p = s.params(EffectId::Ascii).unwrap();
    assert!(p.flag("scale").is_err());
    assert!(p.number("missing").is_err());
}
