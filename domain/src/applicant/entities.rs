//! Applicant entity

use crate::applicant::data::ApplicantData;

/// An end user submitting program applications (Entity)
///
/// The id is assigned by the store on insert; a freshly created applicant
/// has none.
#[derive(Debug, Clone, PartialEq)]
pub struct Applicant {
    id: Option<i64>,
    account_id: i64,
    data: ApplicantData,
}

impl Applicant {
    /// Create a new, unsaved applicant owned by `account_id`.
    pub fn new(account_id: i64) -> Self {
        Self {
            id: None,
            account_id,
            data: ApplicantData::new(),
        }
    }

    /// Reconstruct a persisted applicant.
    pub fn with_id(id: i64, account_id: i64, data: ApplicantData) -> Self {
        Self {
            id: Some(id),
            account_id,
            data,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn account_id(&self) -> i64 {
        self.account_id
    }

    pub fn data(&self) -> &ApplicantData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ApplicantData {
        &mut self.data
    }

    /// Replace the whole answer document (used when persisting staged edits).
    pub fn set_data(&mut self, data: ApplicantData) {
        self.data = data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::path::Path;

    #[test]
    fn test_new_applicant_has_no_id() {
        let applicant = Applicant::new(1);
        assert_eq!(applicant.id(), None);
        assert_eq!(applicant.account_id(), 1);
    }

    #[test]
    fn test_data_is_mutable() {
        let mut applicant = Applicant::new(1);
        applicant
            .data_mut()
            .put_string(&Path::new("applicant.name"), "Alice")
            .unwrap();
        assert_eq!(
            applicant.data().read_string(&Path::new("applicant.name")),
            Some("Alice".to_string())
        );
    }
}
