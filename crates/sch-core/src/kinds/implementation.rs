// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Model implementation with inline model parameters.

use sch_params::ParameterCollection;

use super::{is_sheet, Parameter, PrimitiveKind};
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;

/// Links a component to a simulation/footprint model.
///
/// Model parameters are stored inside the implementation's own record as
/// `PARAMCOUNT` followed by 1-based `PARAMNAME{n}` / `PARAMTEXT{n}` pairs.
/// They surface in traversals as virtual [`Parameter`] children but are never
/// structural nodes of the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Implementation {
    /// Model name.
    pub model_name: String,
    /// Model type (e.g. `PCBLIB`, `SIM`).
    pub model_type: String,
    /// Whether this is the component's active model.
    pub is_current: bool,
    parameters: Vec<Primitive>,
}

impl Implementation {
    /// Creates an implementation with no model parameters.
    pub fn new(model_name: impl Into<String>, model_type: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            model_type: model_type.into(),
            ..Self::default()
        }
    }

    /// Appends a model parameter.
    pub fn push_parameter(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.parameters
            .push(Primitive::new(Parameter::new(name, text)));
    }

    /// Model parameters in record order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> + '_ {
        self.parameters.iter().filter_map(Primitive::as_parameter)
    }
}

impl PrimitiveKind for Implementation {
    fn record_kind(&self) -> RecordKind {
        RecordKind::IMPLEMENTATION
    }

    fn accepts(&self, child: &Primitive) -> bool {
        !is_sheet(child)
    }

    fn virtual_children(&self) -> &[Primitive] {
        &self.parameters
    }

    fn import_extra(&mut self, record: &ParameterCollection) {
        self.model_name = record.get("MODELNAME").as_string_or_default();
        self.model_type = record.get("MODELTYPE").as_string_or_default();
        self.is_current = record.get("ISCURRENT").as_bool();
        self.parameters.clear();
        let count = record.get("PARAMCOUNT").as_int_or_default();
        for n in 1..=count {
            let name = record.get(&format!("PARAMNAME{n}"));
            let text = record.get(&format!("PARAMTEXT{n}"));
            // A count larger than the stored pairs is truncated, not padded.
            if !name.is_present() && !text.is_present() {
                break;
            }
            self.push_parameter(name.as_string_or_default(), text.as_string_or_default());
        }
    }

    fn export_extra(&self, record: &mut ParameterCollection) {
        record.add("MODELNAME", &self.model_name);
        record.add("MODELTYPE", &self.model_type);
        record.add("ISCURRENT", self.is_current);
        record.add("PARAMCOUNT", self.parameters().count());
        for (i, p) in self.parameters().enumerate() {
            let n = i + 1;
            record.add(&format!("PARAMNAME{n}"), &p.name);
            record.add(&format!("PARAMTEXT{n}"), &p.text);
        }
    }
}
