//! Form-body encoding for verification requests.

use recaptcha_common::constants::fields;

/// `key=value` pairs joined with `&`, both sides percent-encoded
pub fn encode_form<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// The four required fields followed by caller extras.
///
/// An extra whose name matches a required field, or repeats an earlier
/// extra, is dropped.
pub fn build_fields<'a>(
    private_key: &'a str,
    remote_ip: &'a str,
    challenge: &'a str,
    response: &'a str,
    extra: &[(&'a str, &'a str)],
) -> Vec<(&'a str, &'a str)> {
    let mut out = vec![
        (fields::PRIVATE_KEY, private_key),
        (fields::REMOTE_IP, remote_ip),
        (fields::CHALLENGE, challenge),
        (fields::RESPONSE, response),
    ];

    for &(name, value) in extra {
        if out.iter().any(|(existing, _)| *existing == name) {
            tracing::debug!(field = %name, "Ignoring extra field that collides with an existing one");
            continue;
        }
        out.push((name, value));
    }

    out
}
