use anyhow::Result;
use hmac::{Hmac, Mac};
use secrecy::SecretString;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tglogin::tglogin::verify::{check, verify, Rejection};

const TOKEN: &str = "TESTTOKEN";

fn expected_hash(check_string: &str) -> Result<String> {
    let key = Sha256::digest(TOKEN.as_bytes());
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&key).map_err(|e| anyhow::anyhow!("{e}"))?;
    mac.update(check_string.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn assertion(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn widget_assertion_round_trip() -> Result<()> {
    let token = SecretString::from(TOKEN);
    let hash = expected_hash("auth_date=1000000000\nfirst_name=A\nid=1")?;

    let valid = assertion(&[
        ("id", "1"),
        ("first_name", "A"),
        ("auth_date", "1000000000"),
        ("hash", hash.as_str()),
    ]);
    assert!(verify(&valid, &token));

    let forged = assertion(&[
        ("id", "1"),
        ("first_name", "A"),
        ("auth_date", "1000000000"),
        ("hash", "deadbeef"),
    ]);
    assert!(!verify(&forged, &token));
    assert_eq!(check(&forged, &token), Err(Rejection::HashMismatch));
    Ok(())
}

#[test]
fn photo_url_is_part_of_the_payload() -> Result<()> {
    let token = SecretString::from(TOKEN);
    let photo = "https://t.me/i/userpic/320/abc.jpg";

    let hash = expected_hash(&format!(
        "auth_date=1000000000\nfirst_name=A\nid=1\nphoto_url={photo}"
    ))?;
    let with_photo = assertion(&[
        ("id", "1"),
        ("first_name", "A"),
        ("photo_url", photo),
        ("auth_date", "1000000000"),
        ("hash", hash.as_str()),
    ]);
    assert!(verify(&with_photo, &token));

    // hash computed while leaving photo_url out of the check string
    let hash = expected_hash("auth_date=1000000000\nfirst_name=A\nid=1")?;
    let skipped_photo = assertion(&[
        ("id", "1"),
        ("first_name", "A"),
        ("photo_url", photo),
        ("auth_date", "1000000000"),
        ("hash", hash.as_str()),
    ]);
    assert!(!verify(&skipped_photo, &token));
    Ok(())
}

#[test]
fn missing_hash_fails_closed() {
    let token = SecretString::from(TOKEN);
    assert!(!verify(&HashMap::new(), &token));
    assert_eq!(
        check(&assertion(&[("id", "1")]), &token),
        Err(Rejection::MissingHash)
    );
}
