use poise::CreateReply;

use crate::sheets::{FromRow, RowError};
use crate::{Context, Error};

const SHEET_NAME: &str = "Alumnos";
const START_ROW: u32 = 2;
const START_COL: &str = "A";
const END_COL: &str = "E";
const EMAIL_COL: &str = "D";

/// One student row of the roster sheet.
///
/// Columns A through D: full name, student id, practice class, email.
/// Anything past that is ignored.
#[derive(Debug)]
#[allow(dead_code)]
struct StudentRecord {
    full_name: String,
    student_id: i64,
    practice_class: String,
    email: String,
}

impl FromRow for StudentRecord {
    fn from_row(row: &[String]) -> Result<Self, RowError> {
        let cell = |index: usize| row.get(index).ok_or(RowError::MissingColumn(index));

        let student_id = cell(1)?
            .trim()
            .parse()
            .map_err(|_| RowError::InvalidCell(1, row[1].clone()))?;

        Ok(Self {
            full_name: cell(0)?.clone(),
            student_id,
            practice_class: cell(2)?.clone(),
            email: cell(3)?.clone(),
        })
    }
}

/// Finds the sheet row of the student with the given id and current email.
/// Row numbers are the sheet's own, offset by where the roster starts.
fn find_student_row(records: &[StudentRecord], student_id: i64, email: &str) -> Option<u32> {
    for (row, record) in (START_ROW..).zip(records) {
        if record.student_id == student_id && record.email == email {
            return Some(row);
        }
    }
    None
}

async fn cambiar_email_impl(
    ctx: Context<'_>,
    padron: i64,
    email_actual: String,
    nuevo_email: String,
) -> Result<(), Error> {
    if email_actual == nuevo_email {
        ctx.send(
            CreateReply::default()
                .content("El nuevo email es el mismo que el actual")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    tracing::info!("Received email change request for {padron} to {nuevo_email}");
    ctx.defer_ephemeral().await?;

    let manager = &ctx.data().spreadsheet_manager;
    let roster_range = format!("{SHEET_NAME}!{START_COL}{START_ROW}:{END_COL}");
    let roster = match manager.get_range::<StudentRecord>(&roster_range).await {
        Ok(roster) => roster,
        Err(e) => {
            tracing::error!("Failed to fetch roster: {e}");
            ctx.say("No se pudo acceder a la planilla. Intentá de nuevo más tarde.")
                .await?;
            return Ok(());
        }
    };

    let row = match find_student_row(&roster.values, padron, &email_actual) {
        Some(row) => row,
        None => {
            ctx.say(format!(
                "No se encontró el padrón {padron} o el email actual no coincide"
            ))
            .await?;
            return Ok(());
        }
    };

    tracing::debug!(
        "Found student {padron} with email {email_actual}, updating to {nuevo_email}"
    );
    let email_range = format!("{SHEET_NAME}!{EMAIL_COL}{row}:{EMAIL_COL}{row}");
    tracing::debug!("Updating cell {email_range} with new email {nuevo_email}");
    if let Err(e) = manager
        .update_range(&email_range, vec![vec![nuevo_email.clone()]])
        .await
    {
        tracing::error!("Failed to update email: {e}");
        ctx.say("No se pudo actualizar la planilla. Intentá de nuevo más tarde.")
            .await?;
        return Ok(());
    }

    tracing::info!(
        "Successfully updated email for {padron} from {email_actual} to {nuevo_email}"
    );
    ctx.say(format!(
        "Se actualizó el email del alumno con padrón {padron} a {nuevo_email}"
    ))
    .await?;
    Ok(())
}

/// Cambia tu email
#[poise::command(slash_command)]
pub async fn cambiar_email(
    ctx: Context<'_>,
    #[description = "Tu numero de padrón o legajo"] padron: i64,
    #[description = "Tu email actual"] email_actual: String,
    #[description = "Tu nuevo email"] nuevo_email: String,
) -> Result<(), Error> {
    cambiar_email_impl(ctx, padron, email_actual, nuevo_email).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn record(student_id: i64, email: &str) -> StudentRecord {
        StudentRecord {
            full_name: "Ada Lovelace".to_string(),
            student_id,
            practice_class: "Martes".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_from_row_parses_full_row() {
        let record =
            StudentRecord::from_row(&row(&["Ada Lovelace", "110110", "Martes", "ada@example.com"]))
                .unwrap();
        assert_eq!(record.full_name, "Ada Lovelace");
        assert_eq!(record.student_id, 110110);
        assert_eq!(record.practice_class, "Martes");
        assert_eq!(record.email, "ada@example.com");
    }

    #[test]
    fn test_from_row_ignores_extra_columns() {
        let record = StudentRecord::from_row(&row(&[
            "Ada Lovelace",
            "110110",
            "Martes",
            "ada@example.com",
            "aprobada",
        ]))
        .unwrap();
        assert_eq!(record.student_id, 110110);
    }

    #[test]
    fn test_from_row_trims_student_id() {
        let record =
            StudentRecord::from_row(&row(&["Ada Lovelace", " 110110 ", "Martes", "a@b.com"]))
                .unwrap();
        assert_eq!(record.student_id, 110110);
    }

    #[test]
    fn test_from_row_short_row() {
        let result = StudentRecord::from_row(&row(&["Ada Lovelace", "110110", "Martes"]));
        assert!(matches!(result, Err(RowError::MissingColumn(3))));
    }

    #[test]
    fn test_from_row_non_numeric_id() {
        let result =
            StudentRecord::from_row(&row(&["Ada Lovelace", "oyente", "Martes", "a@b.com"]));
        match result {
            Err(RowError::InvalidCell(1, value)) => assert_eq!(value, "oyente"),
            other => panic!("expected invalid cell, got {other:?}"),
        }
    }

    #[test]
    fn test_find_student_row_offsets_by_start_row() {
        let records = vec![
            record(110110, "ada@example.com"),
            record(101010, "alan@example.com"),
        ];
        // First roster entry lives at sheet row 2.
        assert_eq!(find_student_row(&records, 110110, "ada@example.com"), Some(2));
        assert_eq!(find_student_row(&records, 101010, "alan@example.com"), Some(3));
    }

    #[test]
    fn test_find_student_row_requires_matching_email() {
        let records = vec![record(110110, "ada@example.com")];
        assert_eq!(find_student_row(&records, 110110, "otra@example.com"), None);
        assert_eq!(find_student_row(&records, 999999, "ada@example.com"), None);
    }

    #[test]
    fn test_range_formatting() {
        let roster_range = format!("{SHEET_NAME}!{START_COL}{START_ROW}:{END_COL}");
        assert_eq!(roster_range, "Alumnos!A2:E");

        let row = 7u32;
        let email_range = format!("{SHEET_NAME}!{EMAIL_COL}{row}:{EMAIL_COL}{row}");
        assert_eq!(email_range, "Alumnos!D7:D7");
    }
}
