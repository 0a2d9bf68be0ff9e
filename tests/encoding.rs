use irikit::encoding::{
    decode, encode, encode_to, Table, PATH, QUERY, REG_NAME, UNRESERVED, USERINFO,
};

#[test]
fn component_tables_shape_the_output() {
    assert_eq!(encode(b"user:pw", &USERINFO), "user:pw");
    assert_eq!(encode(b"user:pw", &UNRESERVED), "user%3Apw");
    assert_eq!(encode(b"/a/b c", &PATH), "/a/b%20c");
    assert_eq!(encode(b"k=v&x=/?", &QUERY), "k=v&x=/?");
    assert_eq!(encode("путь".as_bytes(), &PATH), "%D0%BF%D1%83%D1%82%D1%8C");
}

#[test]
fn reg_name_excludes_authority_delimiters() {
    // For callers encoding a registered name themselves: sub-delims
    // pass through, but the userinfo and port delimiters do not.
    assert_eq!(encode(b"ya.ru", &REG_NAME), "ya.ru");
    assert_eq!(encode(b"user:pw@host", &REG_NAME), "user%3Apw%40host");
    assert!(REG_NAME.allows(b'='));
    assert!(!REG_NAME.allows(b':'));
    assert!(!REG_NAME.allows(b'/'));
}

#[test]
fn percent_is_not_double_encoded() {
    assert_eq!(encode(b"a%20b", &PATH), "a%20b");
}

#[test]
fn encode_to_appends() {
    let mut out = String::from("q=");
    encode_to(b"a b", &QUERY, &mut out);
    assert_eq!(out, "q=a%20b");
}

#[test]
fn decode_restores_octets() {
    assert_eq!(decode(b"a%20b"), b"a b");
    assert_eq!(decode(b"%D0%BF%D1%83%D1%82%D1%8C"), "путь".as_bytes());
    assert_eq!(decode(b"%2f%2F"), b"//");
}

#[test]
fn decode_skips_malformed_escapes() {
    assert_eq!(decode(b"trailing%"), b"trailing");
    assert_eq!(decode(b"short%2"), b"short2");
    assert_eq!(decode(b"bad%xyz"), b"badxyz");
}

#[test]
fn custom_tables_compose() {
    const FORM: Table = Table::new()
        .allow_range(b'a', b'z')
        .allow_range(b'0', b'9')
        .replace(b' ', b'+');
    assert_eq!(encode(b"a b 1%", &FORM), "a+b+1%25");
    assert!(FORM.allows(b' '));
    assert!(!FORM.allows(b'%'));
}
