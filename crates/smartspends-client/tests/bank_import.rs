mod support;

use rusqlite::{Connection, params};
use smartspends_client::commands::expense::{self, ExpenseListOptions};
use smartspends_client::commands::import::{self, ColumnOverrides, ImportRunOptions};
use support::ledger_testkit::{payload, scope, seed, temp_home_in_tmp, write_fixture};

const HDFC_STYLE: &str = "\
Date,Narration,Chq./Ref.No.,Withdrawal Amt.,Deposit Amt.
01/09/26,placeholder,,,
03/09/2026,UPI-ZOMATO,001,\"1,250.00\",
04/09/2026,NEFT SALARY,002,,85000.00
05/09/2026,NETFLIX.COM,003,649.00,
bad-date,ATM WDL,004,2000.00,
";

#[test]
fn import_detects_columns_and_merges_after_existing_rows() {
    let temp = temp_home_in_tmp("smartspends-import");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        seed(&home, "asha", &[("2026-09-02", 40.0, "food", "chai")]);
        let fixture = write_fixture(dir.path(), "statement.csv", HDFC_STYLE);
        assert!(fixture.is_ok());
        let Ok(path) = fixture else {
            return;
        };

        let value = payload(import::run_with_options(ImportRunOptions {
            scope: scope(&home, "asha"),
            path: path.display().to_string(),
            ..ImportRunOptions::default()
        }));
        let data = &value["data"];
        assert_eq!(data["columns"]["date"], "Date");
        assert_eq!(data["columns"]["amount"], "Withdrawal Amt.");
        assert_eq!(data["columns"]["note"], "Narration");
        assert_eq!(data["summary"]["rows_read"], 5);
        assert_eq!(data["summary"]["debits"], 2);
        assert_eq!(data["summary"]["non_debit_rows"], 2);
        assert_eq!(data["summary"]["invalid_date_rows"], 1);
        assert_eq!(data["summary"]["imported"], 2);
        assert_eq!(data["summary"]["collection_size"], 3);
        assert_eq!(data["source_kind"], "file");
        assert_eq!(data["message"], "Imported 2 debits.");

        let listed = payload(expense::list_with_options(ExpenseListOptions {
            scope: scope(&home, "asha"),
            all: true,
        }));
        let rows = listed["data"]["rows"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["note"], "chai");
        assert_eq!(rows[1]["date"], "2026-09-03");
        assert_eq!(rows[1]["amount"], 1250.0);
        assert_eq!(rows[1]["category"], "Bank Debit");
        assert_eq!(rows[2]["note"], "NETFLIX.COM");
    }
}

#[test]
fn dry_run_from_stdin_writes_nothing() {
    let temp = temp_home_in_tmp("smartspends-import-dry");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let value = payload(import::run_with_options(ImportRunOptions {
            scope: scope(&home, "asha"),
            path: "-".to_string(),
            dry_run: true,
            stdin_override: Some(HDFC_STYLE.to_string()),
            ..ImportRunOptions::default()
        }));
        assert_eq!(value["data"]["dry_run"], true);
        assert_eq!(value["data"]["source_kind"], "stdin");
        assert_eq!(value["data"]["summary"]["imported"], 0);

        let listed = payload(expense::list_with_options(ExpenseListOptions {
            scope: scope(&home, "asha"),
            all: true,
        }));
        assert_eq!(listed["data"]["rows"].as_array().map(Vec::len), Some(0));
    }
}

#[test]
fn explicit_columns_override_detection() {
    let temp = temp_home_in_tmp("smartspends-import-override");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let statement = "When,What,Paid\n2026-09-01,Rent,15000\n";
        let value = payload(import::run_with_options(ImportRunOptions {
            scope: scope(&home, "asha"),
            path: "-".to_string(),
            columns: ColumnOverrides {
                date: Some("When".to_string()),
                amount: Some("Paid".to_string()),
                note: Some("What".to_string()),
            },
            stdin_override: Some(statement.to_string()),
            ..ImportRunOptions::default()
        }));
        assert_eq!(value["data"]["summary"]["imported"], 1);
    }
}

#[test]
fn undetectable_amount_column_lists_headers() {
    let temp = temp_home_in_tmp("smartspends-import-missing");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = import::run_with_options(ImportRunOptions {
            scope: scope(&home, "asha"),
            path: "-".to_string(),
            stdin_override: Some("Date,Description,Value\n01/09/2026,x,1\n".to_string()),
            ..ImportRunOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "import_column_missing");
            assert!(!error.is_internal());
            let headers = error
                .data
                .as_ref()
                .and_then(|data| data["headers"].as_array().cloned())
                .unwrap_or_default();
            assert_eq!(headers.len(), 3);
        }
    }
}

#[test]
fn import_keeps_stored_rows_with_unreadable_amounts() {
    let temp = temp_home_in_tmp("smartspends-import-keep");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        seed(&home, "asha", &[("2026-09-02", 40.0, "food", "chai")]);
        let db_path = home.join("ledger.db");
        let connection = Connection::open(&db_path);
        assert!(connection.is_ok());
        let Ok(connection) = connection else {
            return;
        };
        let inserted = connection.execute(
            "INSERT INTO internal_expenses
               (expense_id, user_id, position, posted_at, amount, category, note, created_at)
             VALUES ('exp_text', 'asha', 1, '2026-09-03', ?1, 'rent', 'hand edited', '2026-09-03T00:00:00Z')",
            params!["1,200"],
        );
        assert!(inserted.is_ok());

        let value = payload(import::run_with_options(ImportRunOptions {
            scope: scope(&home, "asha"),
            path: "-".to_string(),
            stdin_override: Some("Date,Description,Debit\n05/09/2026,NETFLIX.COM,649\n".to_string()),
            ..ImportRunOptions::default()
        }));
        assert_eq!(value["data"]["summary"]["imported"], 1);

        let stored = connection.query_row(
            "SELECT COUNT(*), MAX(position) FROM internal_expenses WHERE user_id = 'asha'",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        );
        assert!(matches!(stored, Ok((3, 2))));

        let listed = payload(expense::list_with_options(ExpenseListOptions {
            scope: scope(&home, "asha"),
            all: true,
        }));
        let rows = listed["data"]["rows"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["note"], "chai");
        assert_eq!(rows[1]["note"], "NETFLIX.COM");
    }
}
