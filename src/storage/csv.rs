use std::fs;
use std::path::PathBuf;

use ::csv::{Reader, Writer};
use serde::Deserialize;

use super::{AppError, create_file_parent};
use crate::domain::contact::{Contact, ContactDraft};

pub const IMPORT_PATH: &str = "./csv/contacts.csv";
pub const EXPORT_PATH: &str = "./csv/exported.csv";

/// One imported row. Every column is optional so that hand-written files
/// without an id column still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CsvRecord {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CsvRecord {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}

fn export_path(des: Option<&str>) -> Result<PathBuf, AppError> {
    let Some(path) = des else {
        return Ok(PathBuf::from(EXPORT_PATH));
    };

    let file_path = PathBuf::from(path);
    if file_path.is_dir() {
        return Ok(file_path.join("exported.csv"));
    }
    if file_path.extension().is_some_and(|ext| ext != "csv") {
        return Err(AppError::Validation(
            "Export file must be a .csv file".to_string(),
        ));
    }
    Ok(file_path)
}

/// Writes `contacts` with a header row. Returns the path written and the
/// number of records.
pub fn export_contacts_to_csv(
    contacts: &[Contact],
    des: Option<&str>,
) -> Result<(PathBuf, u64), AppError> {
    let file_path = export_path(des)?;
    create_file_parent(&file_path)?;

    let mut writer = Writer::from_path(&file_path)?;
    let mut counter: u64 = 0;

    for contact in contacts {
        writer.serialize(contact)?;
        counter += 1;
    }

    writer.flush()?;
    Ok((file_path, counter))
}

pub fn read_contacts_from_csv(src: Option<&str>) -> Result<(PathBuf, Vec<CsvRecord>), AppError> {
    let file_path = PathBuf::from(src.unwrap_or(IMPORT_PATH));

    if !fs::exists(&file_path)? {
        return Err(AppError::NotFound("CSV file".to_string()));
    }

    if file_path.extension().is_some_and(|ext| ext != "csv") {
        return Err(AppError::Validation("File not .csv".to_string()));
    }

    let mut reader = Reader::from_path(&file_path)?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: CsvRecord = result?;
        records.push(record);
    }

    Ok((file_path, records))
}
