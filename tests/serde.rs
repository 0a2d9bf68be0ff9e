#![cfg(feature = "serde")]

use irikit::Iri;

#[test]
fn serializes_as_string() {
    let iri = Iri::parse("https://ya.ru/a?b#c").unwrap();
    assert_eq!(
        serde_json::to_string(&iri).unwrap(),
        "\"https://ya.ru/a?b#c\""
    );
    // Internationalized hosts serialize in their ASCII form.
    let iri = Iri::parse("http://москва.рф").unwrap();
    assert_eq!(
        serde_json::to_string(&iri).unwrap(),
        "\"http://xn--80adxhks.xn--p1ai\""
    );
}

#[test]
fn deserializes_from_string() {
    let iri: Iri = serde_json::from_str("\"https://user@ya.ru:99/b?k=v#f\"").unwrap();
    assert_eq!(iri.host(), "ya.ru");
    assert_eq!(iri.port(), 99);
    assert!(serde_json::from_str::<Iri>("\"https:://us\"").is_err());
    assert!(serde_json::from_str::<Iri>("42").is_err());
}
