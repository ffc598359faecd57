use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

use super::RegistryError;

/// Decoded `checkVatResponse`.
///
/// `valid` is kept as the registry's raw string. Observed values are
/// `true` and `false`, but the vocabulary belongs to the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckVatResponse {
    pub country_code: String,
    pub vat_number: String,
    pub valid: String,
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Parse the SOAP envelope returned by the checkVat operation.
///
/// Elements are matched by local name, so any namespace prefix works.
/// An envelope without a `checkVatResponse` (a SOAP fault, for instance)
/// decodes to empty fields.
pub fn parse_check_vat_response(xml: &str) -> Result<CheckVatResponse, RegistryError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut resp = CheckVatResponse::default();
    let mut fault: Option<String> = None;
    let mut path: Vec<String> = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e);
                if path.is_empty() {
                    check_root(&name, saw_root)?;
                    saw_root = true;
                }
                path.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                let name = local_name(e);
                if path.is_empty() {
                    check_root(&name, saw_root)?;
                    saw_root = true;
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| RegistryError::Decoding(e.to_string()))?;
                append_text(&path, &text, &mut resp, &mut fault);
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|e| RegistryError::Decoding(format!("CDATA is not UTF-8: {e}")))?;
                append_text(&path, text, &mut resp, &mut fault);
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(RegistryError::Decoding(format!(
                    "malformed XML at position {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    if !saw_root {
        return Err(RegistryError::Decoding("empty response body".into()));
    }
    if !path.is_empty() {
        return Err(RegistryError::Decoding(format!(
            "unexpected end of document inside <{}>",
            path.join("/")
        )));
    }
    if let Some(fault) = fault {
        warn!(fault = %fault, "VIES returned a SOAP fault");
    }

    Ok(resp)
}

/// Character data of one element may arrive in several events (around
/// comments or CDATA sections), so every piece is appended.
fn append_text(
    path: &[String],
    text: &str,
    resp: &mut CheckVatResponse,
    fault: &mut Option<String>,
) {
    match path_segments(path).as_slice() {
        ["Envelope", "Body", "checkVatResponse", field] => match *field {
            "countryCode" => resp.country_code.push_str(text),
            "vatNumber" => resp.vat_number.push_str(text),
            "valid" => resp.valid.push_str(text),
            _ => {}
        },
        [.., "Fault", "faultstring"] => fault.get_or_insert_with(String::new).push_str(text),
        _ => {}
    }
}

fn check_root(name: &str, seen: bool) -> Result<(), RegistryError> {
    if seen {
        return Err(RegistryError::Decoding("multiple root elements".into()));
    }
    if name != "Envelope" {
        return Err(RegistryError::Decoding(format!(
            "expected <Envelope> root element, found <{name}>"
        )));
    }
    Ok(())
}

fn path_segments(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}
