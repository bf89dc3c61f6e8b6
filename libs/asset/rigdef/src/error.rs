// This file is part of OpenFA.
//
// OpenFA is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenFA is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenFA.  If not, see <http://www.gnu.org/licenses/>.
use std::fmt;
use thiserror::Error;

/// Behavioural severity of a diagnostic, not a type name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    InternalError,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::InternalError => "INTERNAL_ERROR",
        })
    }
}

/// One message produced while scanning, classifying, parsing, or building.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line_no: usize,
    pub section: String,
    pub subsection: Option<String>,
    pub module_name: String,
    pub text: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        line_no: usize,
        section: impl Into<String>,
        module_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            line_no,
            section: section.into(),
            subsection: None,
            module_name: module_name.into(),
            text: text.into(),
        }
    }

    pub fn with_subsection(mut self, subsection: impl Into<String>) -> Self {
        self.subsection = Some(subsection.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}:{}{}] {}: {}",
            self.severity,
            self.module_name,
            self.line_no,
            self.subsection
                .as_ref()
                .map(|s| format!("/{s}"))
                .unwrap_or_default(),
            self.section,
            self.text
        )
    }
}

/// Accumulates diagnostics in parse order and mirrors them to the `log` facade
/// as they are raised, matching the rest of the asset pipeline.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticList {
    messages: Vec<Diagnostic>,
}

impl DiagnosticList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        match diag.severity {
            Severity::Info => log::info!("{diag}"),
            Severity::Warning => log::warn!("{diag}"),
            Severity::Error | Severity::InternalError => log::error!("{diag}"),
        }
        self.messages.push(diag);
    }

    pub fn info(
        &mut self,
        line_no: usize,
        section: impl Into<String>,
        module_name: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.push(Diagnostic::new(
            Severity::Info,
            line_no,
            section,
            module_name,
            text,
        ));
    }

    pub fn warning(
        &mut self,
        line_no: usize,
        section: impl Into<String>,
        module_name: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.push(Diagnostic::new(
            Severity::Warning,
            line_no,
            section,
            module_name,
            text,
        ));
    }

    pub fn error(
        &mut self,
        line_no: usize,
        section: impl Into<String>,
        module_name: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.push(Diagnostic::new(
            Severity::Error,
            line_no,
            section,
            module_name,
            text,
        ));
    }

    pub fn internal_error(
        &mut self,
        line_no: usize,
        section: impl Into<String>,
        module_name: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.push(Diagnostic::new(
            Severity::InternalError,
            line_no,
            section,
            module_name,
            text,
        ));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|d| matches!(d.severity, Severity::Error | Severity::InternalError))
    }

    pub fn has_errors_in(&self, sections: &[&str]) -> bool {
        self.messages.iter().any(|d| {
            matches!(d.severity, Severity::Error | Severity::InternalError)
                && sections.contains(&d.section.as_str())
        })
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.messages
    }
}

/// Fatal configuration failures: the only errors that unwind past the
/// section boundary and out of `parse`/`build`.
#[derive(Debug, Error)]
pub enum RigDefError {
    #[error("missing built-in material `{0}`")]
    MissingBuiltinMaterial(String),
    #[error("missing base managed-material template `{0}`")]
    MissingManagedMaterialTemplate(String),
}
