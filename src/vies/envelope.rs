use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

use super::RegistryError;
use super::ns;

fn xml_io(e: std::io::Error) -> RegistryError {
    RegistryError::Encoding(format!("XML write error: {e}"))
}

/// Input of a single checkVat call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckVatRequest {
    /// 2-letter country code, e.g. `DE`.
    pub country_code: String,
    /// Number part without the country prefix.
    pub vat_number: String,
}

impl CheckVatRequest {
    pub fn new(country_code: impl Into<String>, vat_number: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            vat_number: vat_number.into(),
        }
    }

    /// Render the SOAP envelope into a `String`.
    pub fn to_xml(&self) -> Result<String, RegistryError> {
        let mut buf = Vec::new();
        write_check_vat_request(self, &mut buf)?;
        String::from_utf8(buf).map_err(|e| RegistryError::Encoding(format!("XML UTF-8 error: {e}")))
    }
}

struct EnvelopeWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> EnvelopeWriter<W> {
    fn start(&mut self, name: &str, xmlns: Option<&str>) -> Result<&mut Self, RegistryError> {
        let mut elem = BytesStart::new(name);
        if let Some(ns) = xmlns {
            elem.push_attribute(("xmlns", ns));
        }
        self.writer.write_event(Event::Start(elem)).map_err(xml_io)?;
        Ok(self)
    }

    fn end(&mut self, name: &str) -> Result<&mut Self, RegistryError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, RegistryError> {
        self.start(name, None)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end(name)
    }
}

/// Write the checkVat SOAP envelope for `request` into `sink`.
///
/// Both fields are substituted verbatim apart from XML text escaping.
pub fn write_check_vat_request<W: Write>(
    request: &CheckVatRequest,
    sink: W,
) -> Result<(), RegistryError> {
    let mut w = EnvelopeWriter {
        writer: Writer::new_with_indent(sink, b' ', 2),
    };
    w.start("Envelope", Some(ns::SOAP_ENVELOPE))?
        .start("Body", None)?
        .start("checkVat", Some(ns::CHECK_VAT_TYPES))?
        .text_element("countryCode", &request.country_code)?
        .text_element("vatNumber", &request.vat_number)?
        .end("checkVat")?
        .end("Body")?
        .end("Envelope")?;
    Ok(())
}
