//! Proxifier profile (`.ppx`) rendering
//!
//! The document is built event by event with `quick-xml`, so host and port
//! strings from the source list are escaped rather than pasted into a
//! template.

use crate::error::{Error, Result};
use crate::proxy::models::{AcceptedProxy, Candidate, FIRST_PROXY_ID};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io;
use std::path::Path;

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "proxy_profile.ppx";

/// Per-proxy option bitmask understood by Proxifier
const PROXY_OPTIONS: &str = "48";

const PROFILE_ATTRIBUTES: [(&str, &str); 4] = [
    ("version", "101"),
    ("platform", "Windows"),
    ("product_id", "0"),
    ("product_minver", "310"),
];

const RESOLVE_OPTIONS: [(&str, &str); 3] = [
    ("AutoModeDetection", "true"),
    ("ViaProxy", "false"),
    ("TryLocalDnsFirst", "false"),
];

const GENERAL_OPTIONS: [(&str, &str); 5] = [
    ("HttpProxiesSupport", "false"),
    ("HandleDirectConnections", "true"),
    ("ConnectionLoopDetection", "true"),
    ("ProcessServices", "true"),
    ("ProcessOtherUsers", "true"),
];

/// Assign profile identifiers in list order, starting at 100
pub fn assign_ids(candidates: Vec<Candidate>) -> Vec<AcceptedProxy> {
    candidates
        .into_iter()
        .zip(FIRST_PROXY_ID..)
        .map(|(candidate, id)| AcceptedProxy::new(id, candidate))
        .collect()
}

/// Renders accepted proxies into a Proxifier profile document
pub struct ProfileRenderer;

impl ProfileRenderer {
    /// Assign identifiers and render
    pub fn render_candidates(candidates: Vec<Candidate>) -> Result<String> {
        Self::render(&assign_ids(candidates))
    }

    /// Render the full profile document
    ///
    /// The default rule points at the first proxy. With no proxies the rule
    /// is left out instead of referencing a missing identifier.
    pub fn render(proxies: &[AcceptedProxy]) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        writer.write_event(Event::Start(
            BytesStart::new("ProxifierProfile").with_attributes(PROFILE_ATTRIBUTES),
        ))?;

        write_options(&mut writer)?;
        write_proxy_list(&mut writer, proxies)?;
        writer.write_event(Event::Empty(BytesStart::new("ChainList")))?;
        write_rule_list(&mut writer, proxies.first())?;

        writer.write_event(Event::End(BytesEnd::new("ProxifierProfile")))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| Error::Render(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Write a rendered document, replacing any existing file
pub fn write_profile(path: &Path, document: &str) -> Result<()> {
    std::fs::write(path, document).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_options<W: io::Write>(writer: &mut Writer<W>) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("Options")))?;

    writer.write_event(Event::Start(BytesStart::new("Resolve")))?;
    for (name, enabled) in RESOLVE_OPTIONS {
        write_flag(writer, name, "enabled", enabled)?;
    }
    writer.write_event(Event::End(BytesEnd::new("Resolve")))?;

    write_flag(writer, "Encryption", "mode", "basic")?;
    for (name, enabled) in GENERAL_OPTIONS {
        write_flag(writer, name, "enabled", enabled)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Options")))
}

fn write_proxy_list<W: io::Write>(writer: &mut Writer<W>, proxies: &[AcceptedProxy]) -> io::Result<()> {
    if proxies.is_empty() {
        return writer.write_event(Event::Empty(BytesStart::new("ProxyList")));
    }

    writer.write_event(Event::Start(BytesStart::new("ProxyList")))?;
    for proxy in proxies {
        let id = proxy.id.to_string();
        writer.write_event(Event::Start(
            BytesStart::new("Proxy").with_attributes([("id", id.as_str()), ("type", "SOCKS5")]),
        ))?;
        write_text_element(writer, "Address", proxy.host())?;
        write_text_element(writer, "Port", proxy.port())?;
        write_text_element(writer, "Options", PROXY_OPTIONS)?;
        writer.write_event(Event::End(BytesEnd::new("Proxy")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("ProxyList")))
}

fn write_rule_list<W: io::Write>(writer: &mut Writer<W>, default: Option<&AcceptedProxy>) -> io::Result<()> {
    let Some(default) = default else {
        return writer.write_event(Event::Empty(BytesStart::new("RuleList")));
    };

    writer.write_event(Event::Start(BytesStart::new("RuleList")))?;
    writer.write_event(Event::Start(BytesStart::new("Rule").with_attributes([("enabled", "true")])))?;
    write_text_element(writer, "Name", "Default")?;
    writer.write_event(Event::Start(BytesStart::new("Action").with_attributes([("type", "Proxy")])))?;
    writer.write_event(Event::Text(BytesText::new(&default.id.to_string())))?;
    writer.write_event(Event::End(BytesEnd::new("Action")))?;
    writer.write_event(Event::End(BytesEnd::new("Rule")))?;
    writer.write_event(Event::End(BytesEnd::new("RuleList")))
}

fn write_flag<W: io::Write>(writer: &mut Writer<W>, name: &str, attr: &str, value: &str) -> io::Result<()> {
    writer.write_event(Event::Empty(BytesStart::new(name).with_attributes([(attr, value)])))
}

fn write_text_element<W: io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}
