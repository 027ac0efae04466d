//! Shape descriptors for the metadata tables

/// FHIR data type of a coded attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    /// A `CodeableConcept` value (`{coding: [...]}`)
    CodeableConcept,
    /// A bare `Coding` object
    Coding,
    /// A primitive `code` string
    Code,
}

impl CodeType {
    /// Capitalized type name appended to choice-type attribute paths
    /// (`medication` + `CodeableConcept` -> `medicationCodeableConcept`)
    pub fn choice_suffix(&self) -> &'static str {
        match self {
            CodeType::CodeableConcept => "CodeableConcept",
            CodeType::Coding => "Coding",
            CodeType::Code => "Code",
        }
    }
}

/// Shape of one coded attribute on a resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeAttribute {
    pub code_type: CodeType,
    /// Whether the attribute has cardinality 0..* (values are wrapped in an array)
    pub multiple: bool,
    /// Whether the attribute is a choice type (`value[x]` naming convention)
    pub choice_type: bool,
}

/// Coded-attribute metadata for one resource type
#[derive(Debug, Clone, Copy)]
pub struct ResourceCodeInfo {
    /// The attribute holding the type's principal coded value
    pub primary_code_path: &'static str,
    /// Every coded attribute path and its shape
    pub attributes: &'static [(&'static str, CodeAttribute)],
}

impl ResourceCodeInfo {
    /// Shape of the attribute at `path`, if mapped
    pub fn attribute(&self, path: &str) -> Option<&'static CodeAttribute> {
        self.attributes
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, attribute)| attribute)
    }

    /// Shape of the type's primary code attribute, if mapped
    pub fn primary_attribute(&self) -> Option<&'static CodeAttribute> {
        self.attribute(self.primary_code_path)
    }
}

/// FHIR date type a date-bearing attribute can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateType {
    Period,
    DateTime,
    Date,
}

impl DateType {
    /// Capitalized type name appended to choice-type attribute paths
    /// (`onset` + `Period` -> `onsetPeriod`)
    pub fn choice_suffix(&self) -> &'static str {
        match self {
            DateType::Period => "Period",
            DateType::DateTime => "DateTime",
            DateType::Date => "Date",
        }
    }
}

/// Resolution priority: Period over dateTime over date.
const DATE_TYPE_PRIORITY: [DateType; 3] = [DateType::Period, DateType::DateTime, DateType::Date];

/// Shape of one date-bearing attribute on a resource type
#[derive(Debug, Clone, Copy)]
pub struct DateAttribute {
    /// Whether the attribute is a choice type (`onset[x]` naming convention)
    pub choice_type: bool,
    /// Date types the attribute supports, in resolution priority order
    pub types: &'static [DateType],
}

impl DateAttribute {
    /// The best representable type for this attribute: the highest-priority
    /// date type it supports
    pub fn best_type(&self) -> Option<DateType> {
        DATE_TYPE_PRIORITY
            .iter()
            .copied()
            .find(|t| self.types.contains(t))
            .or_else(|| self.types.first().copied())
    }
}
