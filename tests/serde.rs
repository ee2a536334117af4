#![cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smolopt::serde_impl::{from_json_slice, to_json_vec};
use smolopt::{none, some};

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct Settings {
    name: String,
    #[serde(default, skip_serializing_if = "smolopt::Option::is_zero")]
    retries: smolopt::Option<u32>,
    #[serde(default)]
    proxy: smolopt::Option<String>,
    #[serde(default, skip_serializing_if = "smolopt::Option::is_none")]
    tags: smolopt::Option<Vec<String>>,
}

#[test]
fn test_struct_round_trip() {
    let s = Settings {
        name: "svc".into(),
        retries: some(3),
        proxy: none(),
        tags: some(vec!["a".into()]),
    };
    let text = serde_json::to_string(&s).unwrap();
    assert_eq!(
        text,
        r#"{"name":"svc","retries":3,"proxy":null,"tags":["a"]}"#
    );
    let back: Settings = serde_json::from_str(&text).unwrap();
    assert_eq!(back, s);
}

#[test]
fn test_omit_if_zero() {
    let s = Settings {
        name: "svc".into(),
        retries: some(0),
        ..Settings::default()
    };
    assert_eq!(
        serde_json::to_string(&s).unwrap(),
        r#"{"name":"svc","proxy":null}"#
    );
    let back: Settings = serde_json::from_str(r#"{"name":"svc"}"#).unwrap();
    assert_eq!(back.retries, none());
    assert_eq!(back.proxy, none());
}

#[test]
fn test_bridge_matches_streaming_codec() {
    let cases = vec![none(), some(0i64), some(-17), some(i64::MAX)];
    for o in cases {
        let via_serde = to_json_vec(&o).unwrap();
        assert_eq!(String::from_utf8(via_serde).unwrap(), o.to_json());
        assert_eq!(serde_json::to_string(&o).unwrap(), o.to_json());
    }
    assert_eq!(to_json_vec(&some("q\"")).unwrap(), br#""q\"""#.to_vec());
}

#[test]
fn test_from_json_slice() {
    let mut o = some(1u8);
    from_json_slice(&mut o, b"null").unwrap();
    assert_eq!(o, none());
    from_json_slice(&mut o, b"200").unwrap();
    assert_eq!(o, some(200));
    from_json_slice(&mut o, b" null").unwrap();
    assert_eq!(o, none());

    let mut o = some(1u8);
    assert!(from_json_slice(&mut o, b"300").is_err());
    assert_eq!(o, none());

    let mut o = some(1i32);
    let e = from_json_slice(&mut o, br#"{"a":"#).unwrap_err();
    assert!(e.is_eof() || e.is_data(), "{:?}", e);
    assert_eq!(o, none());
}

#[test]
fn test_deserialize_in_place_resets() {
    let mut o = some(String::from("old"));
    let mut de = serde_json::Deserializer::from_str("17");
    let res = smolopt::Option::<String>::deserialize_in_place(&mut de, &mut o);
    assert!(res.is_err());
    assert_eq!(o, none());

    let mut de = serde_json::Deserializer::from_str(r#""new""#);
    smolopt::Option::<String>::deserialize_in_place(&mut de, &mut o).unwrap();
    assert_eq!(o, some("new".to_string()));
}
