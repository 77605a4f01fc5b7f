// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Primitive ⇄ parameter record conversion.

use sch_params::ParameterCollection;
use thiserror::Error;

use crate::kinds::PrimitiveKind;
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;

/// Field names of the base record contract.
pub mod keys {
    /// Discriminator.
    pub const RECORD: &str = "RECORD";
    /// Persisted owner flat position.
    pub const OWNER_INDEX: &str = "OWNERINDEX";
    /// Inverted accessibility flag (spelling is part of the format).
    pub const IS_NOT_ACCESSIBLE: &str = "ISNOTACCESIBLE";
    /// Live position among the owner's children; written, never read.
    pub const INDEX_IN_SHEET: &str = "INDEXINSHEET";
    /// Owning part.
    pub const OWNER_PART_ID: &str = "OWNERPARTID";
    /// Owning display mode.
    pub const OWNER_PART_DISPLAY_MODE: &str = "OWNERPARTDISPLAYMODE";
    /// Editing lock.
    pub const GRAPHICALLY_LOCKED: &str = "GRAPHICALLYLOCKED";

    /// Base fields in export order.
    pub const BASE: [&str; 7] = [
        RECORD,
        OWNER_INDEX,
        IS_NOT_ACCESSIBLE,
        INDEX_IN_SHEET,
        OWNER_PART_ID,
        OWNER_PART_DISPLAY_MODE,
        GRAPHICALLY_LOCKED,
    ];

    /// Returns `true` for a base-contract field name (any case).
    pub fn is_base_key(key: &str) -> bool {
        BASE.iter().any(|k| k.eq_ignore_ascii_case(key))
    }
}

/// Errors raised by record import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The record's discriminator names a different kind.
    #[error("record type mismatch: expected {expected} but got {actual}")]
    RecordKindMismatch {
        /// Kind of the primitive being imported into.
        expected: RecordKind,
        /// Kind found in the record (`0` when absent or malformed).
        actual: RecordKind,
    },
}

/// Discriminator of a record; `0` when absent or malformed.
pub fn record_kind_of(record: &ParameterCollection) -> RecordKind {
    RecordKind(record.get(keys::RECORD).as_int_or_default())
}

impl Primitive {
    /// Populates this primitive from `record`.
    ///
    /// The discriminator is checked before anything is written, so a
    /// mismatch leaves the primitive untouched. Missing or malformed numeric
    /// fields read as `0`, booleans as `false`.
    pub fn import_from_parameters(
        &mut self,
        record: &ParameterCollection,
    ) -> Result<(), CodecError> {
        let expected = self.record_kind();
        let actual = record_kind_of(record);
        if actual != expected {
            return Err(CodecError::RecordKindMismatch { expected, actual });
        }

        self.owner_index = record.get(keys::OWNER_INDEX).as_int_or_default();
        self.is_accessible = !record.get(keys::IS_NOT_ACCESSIBLE).as_bool();
        self.owner_part_id = record.get(keys::OWNER_PART_ID).as_int_or_default();
        self.owner_part_display_mode = record
            .get(keys::OWNER_PART_DISPLAY_MODE)
            .as_int_or_default();
        self.graphically_locked = record.get(keys::GRAPHICALLY_LOCKED).as_bool();
        self.body_mut().import_extra(record);
        Ok(())
    }

    /// Creates a primitive of the record's own kind and imports into it.
    ///
    /// Returns `None` when the discriminator has no modelled kind.
    pub fn from_parameters(record: &ParameterCollection) -> Option<Self> {
        let mut primitive = Self::for_kind(record_kind_of(record))?;
        // Kind was taken from the record itself, so the check cannot fail.
        primitive.import_from_parameters(record).ok()?;
        Some(primitive)
    }

    /// Writes the base fields then the kind fields.
    pub(crate) fn write_parameters(&self, record: &mut ParameterCollection, index_in_sheet: i32) {
        record.add(keys::RECORD, self.record_kind().value());
        record.add(keys::OWNER_INDEX, self.owner_index);
        record.add(keys::IS_NOT_ACCESSIBLE, !self.is_accessible);
        record.add(keys::INDEX_IN_SHEET, index_in_sheet);
        record.add(keys::OWNER_PART_ID, self.owner_part_id);
        record.add(keys::OWNER_PART_DISPLAY_MODE, self.owner_part_display_mode);
        record.add(keys::GRAPHICALLY_LOCKED, self.graphically_locked);
        self.body().export_extra(record);
    }

    /// Exports a primitive that sits outside any tree (`INDEXINSHEET=-1`).
    pub fn export_detached(&self, record: &mut ParameterCollection) {
        self.write_parameters(record, -1);
    }

    /// Allocating form of [`export_detached`](Self::export_detached).
    pub fn to_parameters_detached(&self) -> ParameterCollection {
        let mut record = ParameterCollection::new();
        self.export_detached(&mut record);
        record
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::kinds::{Component, Implementation, Label, Pin, Unknown};
    use crate::primitive::ALL_PARTS;

    #[test]
    fn export_writes_base_fields_in_fixed_order() {
        let record = Primitive::new(Label::default()).to_parameters_detached();
        let head: Vec<_> = record.keys().take(keys::BASE.len()).collect();
        assert_eq!(head, keys::BASE);
        assert_eq!(record.get(keys::INDEX_IN_SHEET).as_int(), Some(-1));
        assert_eq!(record.get(keys::OWNER_PART_ID).as_int(), Some(ALL_PARTS));
    }

    #[test]
    fn missing_flags_default_to_accessible_and_unlocked() {
        let record: ParameterCollection = "|RECORD=4|OWNERINDEX=3".parse().unwrap();
        let mut p = Primitive::new(Label::default());
        p.is_accessible = false;
        p.graphically_locked = true;
        p.import_from_parameters(&record).unwrap();
        assert!(p.is_accessible);
        assert!(!p.graphically_locked);
        assert_eq!(p.owner_index, 3);
        // Absent numeric fields read as zero, not as the construction default.
        assert_eq!(p.owner_part_id, 0);
    }

    #[test]
    fn mismatch_names_both_kinds_and_changes_nothing() {
        let mut p = Primitive::new(Pin {
            name: "A".into(),
            ..Pin::default()
        });
        p.owner_index = 9;
        let before = p.clone();
        let record: ParameterCollection = "|RECORD=1|OWNERINDEX=4|NAME=B".parse().unwrap();
        let err = p.import_from_parameters(&record).unwrap_err();
        assert_eq!(
            err,
            CodecError::RecordKindMismatch {
                expected: RecordKind::PIN,
                actual: RecordKind::COMPONENT
            }
        );
        assert_eq!(err.to_string(), "record type mismatch: expected 2 but got 1");
        assert_eq!(p, before);
    }

    #[test]
    fn missing_discriminator_is_a_mismatch() {
        let record: ParameterCollection = "|NAME=x".parse().unwrap();
        let mut p = Primitive::new(Pin::default());
        assert!(matches!(
            p.import_from_parameters(&record),
            Err(CodecError::RecordKindMismatch { actual: RecordKind(0), .. })
        ));
    }

    #[test]
    fn malformed_fields_are_defaulted() {
        let record: ParameterCollection =
            "|RECORD=1|OWNERPARTID=abc|GRAPHICALLYLOCKED=maybe|PARTCOUNT=2x".parse().unwrap();
        let p = Primitive::from_parameters(&record).unwrap();
        assert_eq!(p.owner_part_id, 0);
        assert!(!p.graphically_locked);
        assert_eq!(p.as_component().map(|c| c.part_count), Some(0));
    }

    #[test]
    fn component_fields_round_trip() {
        let mut p = Primitive::new(Component {
            lib_reference: "LM358".into(),
            current_part_id: 2,
            part_count: 3,
            display_mode: 1,
            display_mode_count: 2,
        });
        p.owner_index = 5;
        p.owner_part_display_mode = 1;
        p.graphically_locked = true;
        p.is_accessible = false;
        let record = p.to_parameters_detached();
        let back = Primitive::from_parameters(&record).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn implementation_parameters_are_inline() {
        let mut imp = Implementation::new("SOIC8", "PCBLIB");
        imp.is_current = true;
        imp.push_parameter("Pitch", "1.27mm");
        imp.push_parameter("Pads", "8");
        let p = Primitive::new(imp);
        let record = p.to_parameters_detached();
        assert_eq!(record.get("PARAMCOUNT").as_int(), Some(2));
        assert_eq!(record.get("PARAMNAME2").as_str(), Some("Pads"));
        let back = Primitive::from_parameters(&record).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn implementation_count_beyond_stored_pairs_is_truncated() {
        let record: ParameterCollection =
            "|RECORD=45|PARAMCOUNT=2147483647|PARAMNAME1=A|PARAMTEXT1=1".parse().unwrap();
        let p = Primitive::from_parameters(&record).unwrap();
        let imp = p.as_implementation().unwrap();
        assert_eq!(imp.parameters().count(), 1);
    }

    #[test]
    fn unknown_kind_keeps_extra_fields_verbatim() {
        let record: ParameterCollection =
            "|RECORD=27|OWNERINDEX=1|ISNOTACCESIBLE=T|LINEWIDTH=1|Color=128|LOCATIONCOUNT=2"
                .parse()
                .unwrap();
        let mut p = Primitive::placeholder(RecordKind(27));
        p.import_from_parameters(&record).unwrap();
        assert!(!p.is_accessible);
        let unknown: &Unknown = p.as_unknown().unwrap();
        assert_eq!(
            unknown.fields.keys().collect::<Vec<_>>(),
            ["LINEWIDTH", "Color", "LOCATIONCOUNT"]
        );
        let out = p.to_parameters_detached();
        assert_eq!(out.get("color").as_int(), Some(128));
    }

    #[test]
    fn unknown_fields_cannot_overwrite_base_keys() {
        let mut unknown = Unknown::new(RecordKind(27));
        unknown.fields.add("RECORD", 5);
        unknown.fields.add("ownerindex", 99);
        unknown.fields.add("WIDTH", 3);
        let mut p = Primitive::new(unknown);
        p.owner_index = 4;
        let out = p.to_parameters_detached();
        assert_eq!(out.get("RECORD").as_int(), Some(27));
        assert_eq!(out.get("OWNERINDEX").as_int(), Some(4));
        assert_eq!(out.get("WIDTH").as_int(), Some(3));

        let mut copy = Primitive::placeholder(RecordKind(27));
        copy.import_from_parameters(&out).unwrap();
        assert_eq!(copy.owner_index, 4);
    }
}
