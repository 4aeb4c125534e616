//! Manual corrections a reviewer applies to a normalized candidate before
//! exporting it.

use serde::{Deserialize, Serialize};

use crate::normalize::models::CandidateProfile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListField {
    Skills,
    Languages,
    Certifications,
}

/// Shared by experience and education entries; `Title`/`Company` address an
/// experience entry, `Degree`/`Institution` an education entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    Title,
    Company,
    Degree,
    Institution,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProfileEdit {
    SetContact {
        field: ContactField,
        value: String,
    },
    AddItem {
        list: ListField,
        value: String,
    },
    RemoveItem {
        list: ListField,
        index: usize,
    },
    UpdateExperience {
        index: usize,
        field: EntryField,
        value: String,
    },
    UpdateEducation {
        index: usize,
        field: EntryField,
        value: String,
    },
}

impl CandidateProfile {
    /// Applies one edit. Blank additions, out-of-range indices and fields
    /// that do not belong to the addressed entry are ignored.
    pub fn apply(&mut self, edit: &ProfileEdit) {
        match edit {
            ProfileEdit::SetContact { field, value } => {
                let slot = match field {
                    ContactField::Name => &mut self.name,
                    ContactField::Email => &mut self.email,
                    ContactField::Phone => &mut self.phone,
                    ContactField::Address => &mut self.address,
                };
                *slot = value.clone();
            }
            ProfileEdit::AddItem { list, value } => {
                let value = value.trim();
                if !value.is_empty() {
                    self.list_mut(*list).push(value.to_string());
                }
            }
            ProfileEdit::RemoveItem { list, index } => {
                let items = self.list_mut(*list);
                if *index < items.len() {
                    items.remove(*index);
                }
            }
            ProfileEdit::UpdateExperience {
                index,
                field,
                value,
            } => {
                if let Some(entry) = self.experience.get_mut(*index) {
                    let slot = match field {
                        EntryField::Title => &mut entry.title,
                        EntryField::Company => &mut entry.company,
                        EntryField::StartDate => &mut entry.start_date,
                        EntryField::EndDate => &mut entry.end_date,
                        EntryField::Description => &mut entry.description,
                        EntryField::Degree | EntryField::Institution => return,
                    };
                    *slot = value.clone();
                }
            }
            ProfileEdit::UpdateEducation {
                index,
                field,
                value,
            } => {
                if let Some(entry) = self.education.get_mut(*index) {
                    let slot = match field {
                        EntryField::Degree => &mut entry.degree,
                        EntryField::Institution => &mut entry.institution,
                        EntryField::StartDate => &mut entry.start_date,
                        EntryField::EndDate => &mut entry.end_date,
                        EntryField::Description => &mut entry.description,
                        EntryField::Title | EntryField::Company => return,
                    };
                    *slot = value.clone();
                }
            }
        }
    }

    fn list_mut(&mut self, list: ListField) -> &mut Vec<String> {
        match list {
            ListField::Skills => &mut self.skills,
            ListField::Languages => &mut self.languages,
            ListField::Certifications => &mut self.certifications,
        }
    }
}

/// Applies edits in order and returns the edited profile.
pub fn apply_edits(mut profile: CandidateProfile, edits: &[ProfileEdit]) -> CandidateProfile {
    for edit in edits {
        profile.apply(edit);
    }
    profile
}
