//! Record <-> document mapping.
//!
//! | Kind | `ID` | Required | Dates |
//! |---|---|---|---|
//! | PAGE_ITEM | always new | LRU | yes |
//! | WEBENTITY | kept, else new | - | yes |
//! | NODE_LINK | always new | SOURCE, TARGET | yes |
//! | WEBENTITY_LINK | kept, else new | SOURCE, TARGET | yes |
//! | WEBENTITY_NODE_LINK | kept, else new | SOURCE, TARGET | no |
//! | WEBENTITY_CREATION_RULE | always new | LRU or REGEXP | yes |
//! | PRECISION_EXCEPTION | none | LRU | no |
//!
//! Missing required fields produce [`Encoded::Refused`], except for creation
//! rules, where they are a caller error.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use webgraph_types::{
    revert_lru, tag_value_count, NodeLink, PageItem, PrecisionException, Record, RecordKind,
    WebEntity, WebEntityCreationRule, WebEntityLink, WebEntityNodeLink, WebEntityStatus,
    DEFAULT_WEBENTITY_CREATION_RULE, UNASSIGNED_WEBENTITY_NAME,
};

use crate::clock::{Clock, IdSource, SystemClock, UlidSource};
use crate::document::Document;
use crate::error::CodecError;
use crate::field::FieldName;
use crate::stamp::{parse_date, set_document_dates};
use crate::tags::{decode_tags, encode_tags};

/// Field a refused record was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Lru,
    Source,
    Target,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::Lru => write!(f, "LRU"),
            MissingField::Source => write!(f, "source"),
            MissingField::Target => write!(f, "target"),
        }
    }
}

/// Why a record produced no document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refusal {
    pub kind: RecordKind,
    pub missing: MissingField,
}

impl std::fmt::Display for Refusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} without {}", self.kind, self.missing)
    }
}

/// Outcome of encoding one record.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Document(Document),
    /// The record lacks a field it cannot be stored without
    Refused(Refusal),
}

impl Encoded {
    pub fn document(self) -> Option<Document> {
        match self {
            Encoded::Document(doc) => Some(doc),
            Encoded::Refused(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Encoded::Document(doc) => Some(doc),
            Encoded::Refused(_) => None,
        }
    }

    pub fn refusal(&self) -> Option<Refusal> {
        match self {
            Encoded::Document(_) => None,
            Encoded::Refused(refusal) => Some(*refusal),
        }
    }

    pub fn is_refused(&self) -> bool {
        matches!(self, Encoded::Refused(_))
    }
}

/// How a kind's `ID` is assigned on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdPolicy {
    AlwaysNew,
    KeepSupplied,
}

fn id_policy(kind: RecordKind) -> Option<IdPolicy> {
    if !kind.has_identity() {
        return None;
    }
    match kind {
        RecordKind::WebEntity | RecordKind::WebEntityLink | RecordKind::WebEntityNodeLink => {
            Some(IdPolicy::KeepSupplied)
        }
        _ => Some(IdPolicy::AlwaysNew),
    }
}

/// Stateless record codec.
///
/// Encoding reads the clock for dates and draws fresh identities from the id
/// source; everything else is a pure function of the record.
pub struct RecordCodec<C = SystemClock, I = UlidSource> {
    clock: C,
    ids: I,
}

impl RecordCodec {
    /// Codec on the wall clock with ULID identities.
    pub fn system() -> Self {
        Self::new(SystemClock::new(), UlidSource)
    }
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::system()
    }
}

impl<C: Clock, I: IdSource> RecordCodec<C, I> {
    pub fn new(clock: C, ids: I) -> Self {
        Self { clock, ids }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Encode any record.
    pub fn encode(&self, record: &Record) -> Result<Encoded, CodecError> {
        let encoded = match record {
            Record::PageItem(r) => self.encode_page_item(r),
            Record::NodeLink(r) => self.encode_node_link(r),
            Record::PrecisionException(r) => self.encode_precision_exception(r),
            Record::WebEntity(r) => Encoded::Document(self.encode_web_entity(r)),
            Record::WebEntityNodeLink(r) => self.encode_web_entity_node_link(r),
            Record::WebEntityLink(r) => self.encode_web_entity_link(r),
            Record::WebEntityCreationRule(r) => Encoded::Document(self.encode_creation_rule(r)?),
        };
        if let Encoded::Document(doc) = &encoded {
            trace!(kind = %record.kind(), fields = doc.len(), id = ?doc.id(), "Encoded record");
        }
        Ok(encoded)
    }

    /// Encode a record that may be absent.
    pub fn encode_opt(&self, record: Option<&Record>) -> Result<Encoded, CodecError> {
        match record {
            Some(record) => self.encode(record),
            None => Err(CodecError::MissingRecord),
        }
    }

    /// Decode a document, taking its kind from the discriminator.
    pub fn decode(&self, document: &Document) -> Result<Record, CodecError> {
        decode(document)
    }

    /// Decode a document that may be absent.
    pub fn decode_opt(&self, document: Option<&Document>) -> Result<Record, CodecError> {
        decode_opt(document)
    }

    /// Decode a document as the given kind, ignoring its discriminator.
    pub fn decode_as(&self, document: &Document, kind: RecordKind) -> Record {
        decode_as(document, kind)
    }

    pub fn encode_page_item(&self, page: &PageItem) -> Encoded {
        let Some(lru) = non_empty(&page.lru) else {
            return refuse(RecordKind::PageItem, MissingField::Lru);
        };
        let mut doc = self.start_document(RecordKind::PageItem, page.id.as_deref());
        doc.add(FieldName::Lru, lru);

        let url = match non_empty(&page.url) {
            Some(url) => url.to_string(),
            None => revert_lru(lru),
        };
        doc.add(FieldName::Url, url);

        write_opt(&mut doc, FieldName::CrawlerTs, &page.crawler_timestamp);
        doc.add(FieldName::Depth, page.depth.to_string());
        write_opt(&mut doc, FieldName::Error, &page.error_code);
        doc.add(FieldName::HttpStatus, page.http_status_code.to_string());
        doc.add(FieldName::IsNode, page.is_node.to_string());
        doc.add(FieldName::FullPrecision, page.is_full_precision.to_string());
        write_set(&mut doc, FieldName::Source, &page.source_set);
        encode_tags(&mut doc, &page.tags);

        self.finish(RecordKind::PageItem, &mut doc, page.creation_date);
        Encoded::Document(doc)
    }

    /// Web entities are always encodable: a missing name becomes
    /// [`UNASSIGNED_WEBENTITY_NAME`].
    pub fn encode_web_entity(&self, entity: &WebEntity) -> Document {
        let mut doc = self.start_document(RecordKind::WebEntity, entity.id.as_deref());

        let name = non_empty(&entity.name).unwrap_or(UNASSIGNED_WEBENTITY_NAME);
        doc.add(FieldName::Name, name);

        write_set(&mut doc, FieldName::Lru, &entity.lru_set);
        trace!(
            id = ?doc.id(),
            lrus = entity.lru_set.len(),
            tags = tag_value_count(&entity.tags),
            "Encoding web entity"
        );

        doc.add(FieldName::Status, entity.status.as_str());
        write_opt(&mut doc, FieldName::Homepage, &entity.homepage);
        write_set(&mut doc, FieldName::Startpage, &entity.startpages);
        encode_tags(&mut doc, &entity.tags);

        self.finish(RecordKind::WebEntity, &mut doc, entity.creation_date);
        doc
    }

    pub fn encode_node_link(&self, link: &NodeLink) -> Encoded {
        let Some(source) = non_empty(&link.source_lru) else {
            return refuse(RecordKind::NodeLink, MissingField::Source);
        };
        let Some(target) = non_empty(&link.target_lru) else {
            return refuse(RecordKind::NodeLink, MissingField::Target);
        };
        let mut doc = self.start_document(RecordKind::NodeLink, link.id.as_deref());
        write_endpoints(&mut doc, source, target, link.weight);
        self.finish(RecordKind::NodeLink, &mut doc, link.creation_date);
        Encoded::Document(doc)
    }

    pub fn encode_web_entity_link(&self, link: &WebEntityLink) -> Encoded {
        let Some(source) = non_empty(&link.source_id) else {
            return refuse(RecordKind::WebEntityLink, MissingField::Source);
        };
        let Some(target) = non_empty(&link.target_id) else {
            return refuse(RecordKind::WebEntityLink, MissingField::Target);
        };
        let mut doc = self.start_document(RecordKind::WebEntityLink, link.id.as_deref());
        write_endpoints(&mut doc, source, target, link.weight);
        self.finish(RecordKind::WebEntityLink, &mut doc, link.creation_date);
        Encoded::Document(doc)
    }

    /// No dates are written for this kind.
    pub fn encode_web_entity_node_link(&self, link: &WebEntityNodeLink) -> Encoded {
        let Some(source) = non_empty(&link.source_id) else {
            return refuse(RecordKind::WebEntityNodeLink, MissingField::Source);
        };
        let Some(target) = non_empty(&link.target_lru) else {
            return refuse(RecordKind::WebEntityNodeLink, MissingField::Target);
        };
        let mut doc = self.start_document(RecordKind::WebEntityNodeLink, link.id.as_deref());
        write_endpoints(&mut doc, source, target, link.weight);
        self.finish(RecordKind::WebEntityNodeLink, &mut doc, None);
        Encoded::Document(doc)
    }

    /// Fails when the rule has neither an LRU nor a pattern.
    pub fn encode_creation_rule(
        &self,
        rule: &WebEntityCreationRule,
    ) -> Result<Document, CodecError> {
        if rule.lru.is_none() && rule.regexp.is_none() {
            return Err(CodecError::InvalidCreationRule(
                "neither LRU nor regexp is set".into(),
            ));
        }
        let mut doc = self.start_document(RecordKind::WebEntityCreationRule, rule.id.as_deref());

        let lru = non_empty(&rule.lru).unwrap_or(DEFAULT_WEBENTITY_CREATION_RULE);
        doc.add(FieldName::Lru, lru);
        if let Some(regexp) = &rule.regexp {
            doc.add(FieldName::Regexp, regexp.as_str());
        }

        self.finish(RecordKind::WebEntityCreationRule, &mut doc, rule.creation_date);
        Ok(doc)
    }

    /// Precision exceptions are keyed by LRU alone: no id, no dates.
    pub fn encode_precision_exception(&self, exception: &PrecisionException) -> Encoded {
        let Some(lru) = exception.lru.as_deref() else {
            return refuse(RecordKind::PrecisionException, MissingField::Lru);
        };
        let mut doc = self.start_document(RecordKind::PrecisionException, None);
        doc.add(FieldName::Lru, lru);
        self.finish(RecordKind::PrecisionException, &mut doc, None);
        Encoded::Document(doc)
    }

    /// Stamp dates on kinds that carry them.
    fn finish(&self, kind: RecordKind, doc: &mut Document, creation_date: Option<DateTime<Utc>>) {
        if kind.has_timestamps() {
            set_document_dates(doc, creation_date, &self.clock);
        }
    }

    /// New document holding the identity (if the kind has one) and the discriminator.
    fn start_document(&self, kind: RecordKind, supplied_id: Option<&str>) -> Document {
        let mut doc = Document::new();
        let supplied_id = supplied_id.filter(|id| !id.is_empty());
        let id = match id_policy(kind) {
            None => None,
            Some(IdPolicy::KeepSupplied) => Some(
                supplied_id
                    .map(str::to_string)
                    .unwrap_or_else(|| self.ids.next_id()),
            ),
            Some(IdPolicy::AlwaysNew) => Some(self.ids.next_id()),
        };
        if let Some(id) = id {
            doc.add(FieldName::Id, id);
        }
        doc.add(FieldName::Type, kind.as_str());
        doc
    }
}

fn refuse(kind: RecordKind, missing: MissingField) -> Encoded {
    let refusal = Refusal { kind, missing };
    warn!(kind = %kind, missing = %missing, "Refusing to create document: {}", refusal);
    Encoded::Refused(refusal)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn write_opt(doc: &mut Document, field: FieldName, value: &Option<String>) {
    if let Some(value) = non_empty(value) {
        doc.add(field, value);
    }
}

fn write_set(doc: &mut Document, field: FieldName, values: &BTreeSet<String>) {
    for value in values {
        doc.add(field, value.as_str());
    }
}

fn write_endpoints(doc: &mut Document, source: &str, target: &str, weight: i32) {
    doc.add(FieldName::Source, source);
    doc.add(FieldName::Target, target);
    doc.add(FieldName::Weight, weight.to_string());
}

/// Decode a document, taking its kind from the discriminator.
pub fn decode(document: &Document) -> Result<Record, CodecError> {
    let raw = document
        .get(FieldName::Type)
        .ok_or(CodecError::MissingDiscriminator)?;
    let kind = RecordKind::parse(raw).ok_or_else(|| CodecError::UnknownKind(raw.to_string()))?;
    Ok(decode_as(document, kind))
}

/// Decode a document that may be absent.
pub fn decode_opt(document: Option<&Document>) -> Result<Record, CodecError> {
    decode(document.ok_or(CodecError::MissingDocument)?)
}

/// Decode a document as `kind`. Absent fields resolve to defaults.
pub fn decode_as(document: &Document, kind: RecordKind) -> Record {
    match kind {
        RecordKind::PageItem => Record::PageItem(decode_page_item(document)),
        RecordKind::NodeLink => Record::NodeLink(decode_node_link(document)),
        RecordKind::PrecisionException => {
            Record::PrecisionException(decode_precision_exception(document))
        }
        RecordKind::WebEntity => Record::WebEntity(decode_web_entity(document)),
        RecordKind::WebEntityNodeLink => {
            Record::WebEntityNodeLink(decode_web_entity_node_link(document))
        }
        RecordKind::WebEntityLink => Record::WebEntityLink(decode_web_entity_link(document)),
        RecordKind::WebEntityCreationRule => {
            Record::WebEntityCreationRule(decode_creation_rule(document))
        }
    }
}

pub fn decode_page_item(doc: &Document) -> PageItem {
    PageItem {
        id: read_string(doc, FieldName::Id),
        lru: read_string(doc, FieldName::Lru),
        url: read_string(doc, FieldName::Url),
        crawler_timestamp: read_string(doc, FieldName::CrawlerTs),
        depth: read_int(doc, FieldName::Depth),
        error_code: read_string(doc, FieldName::Error),
        http_status_code: read_int(doc, FieldName::HttpStatus),
        is_node: read_bool(doc, FieldName::IsNode),
        is_full_precision: read_bool(doc, FieldName::FullPrecision),
        source_set: read_set(doc, FieldName::Source),
        tags: decode_tags(doc),
        creation_date: read_date(doc, FieldName::DateCreated),
        last_modification_date: read_date(doc, FieldName::DateModified),
    }
}

/// The stored status is normalized again, so documents written with an
/// unknown status read back as `DISCOVERED`.
pub fn decode_web_entity(doc: &Document) -> WebEntity {
    let lru_set = read_set(doc, FieldName::Lru);
    trace!(id = ?doc.id(), lrus = lru_set.len(), "Decoding web entity");

    WebEntity {
        id: read_string(doc, FieldName::Id),
        name: read_string(doc, FieldName::Name),
        lru_set,
        status: WebEntityStatus::normalize(doc.get(FieldName::Status)),
        homepage: read_string(doc, FieldName::Homepage),
        startpages: read_set(doc, FieldName::Startpage),
        tags: decode_tags(doc),
        creation_date: read_date(doc, FieldName::DateCreated),
        last_modification_date: read_date(doc, FieldName::DateModified),
    }
}

pub fn decode_node_link(doc: &Document) -> NodeLink {
    NodeLink {
        id: read_string(doc, FieldName::Id),
        source_lru: read_string(doc, FieldName::Source),
        target_lru: read_string(doc, FieldName::Target),
        weight: read_int(doc, FieldName::Weight),
        creation_date: read_date(doc, FieldName::DateCreated),
        last_modification_date: read_date(doc, FieldName::DateModified),
    }
}

pub fn decode_web_entity_link(doc: &Document) -> WebEntityLink {
    WebEntityLink {
        id: read_string(doc, FieldName::Id),
        source_id: read_string(doc, FieldName::Source),
        target_id: read_string(doc, FieldName::Target),
        weight: read_int(doc, FieldName::Weight),
        creation_date: read_date(doc, FieldName::DateCreated),
        last_modification_date: read_date(doc, FieldName::DateModified),
    }
}

pub fn decode_web_entity_node_link(doc: &Document) -> WebEntityNodeLink {
    WebEntityNodeLink {
        id: read_string(doc, FieldName::Id),
        source_id: read_string(doc, FieldName::Source),
        target_lru: read_string(doc, FieldName::Target),
        weight: read_int(doc, FieldName::Weight),
    }
}

pub fn decode_creation_rule(doc: &Document) -> WebEntityCreationRule {
    let rule = WebEntityCreationRule {
        id: read_string(doc, FieldName::Id),
        lru: read_string(doc, FieldName::Lru),
        regexp: read_string(doc, FieldName::Regexp),
        creation_date: read_date(doc, FieldName::DateCreated),
        last_modification_date: read_date(doc, FieldName::DateModified),
    };
    trace!(lru = ?rule.lru, regexp = ?rule.regexp, "Decoded creation rule");
    rule
}

pub fn decode_precision_exception(doc: &Document) -> PrecisionException {
    PrecisionException {
        lru: read_string(doc, FieldName::Lru),
    }
}

fn read_string(doc: &Document, field: FieldName) -> Option<String> {
    doc.get(field).map(str::to_string)
}

/// Zero when absent, blank or unparsable.
fn read_int(doc: &Document, field: FieldName) -> i32 {
    let Some(raw) = doc.get(field).map(str::trim).filter(|v| !v.is_empty()) else {
        return 0;
    };
    raw.parse().unwrap_or_else(|_| {
        debug!(field = %field, value = raw, "Unparsable numeric field, using 0");
        0
    })
}

fn read_bool(doc: &Document, field: FieldName) -> bool {
    doc.get(field)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn read_set(doc: &Document, field: FieldName) -> BTreeSet<String> {
    doc.get_all(field).map(str::to_string).collect()
}

fn read_date(doc: &Document, field: FieldName) -> Option<DateTime<Utc>> {
    doc.get(field).and_then(parse_date)
}
