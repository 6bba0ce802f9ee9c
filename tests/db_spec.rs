use speculate2::speculate;
use tallypad::db::Database;
use tallypad::models::*;

fn input(expression: &str, result: &str) -> CreateCalculationInput {
    CreateCalculationInput {
        expression: expression.to_string(),
        result: result.to_string(),
    }
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "save_calculation" {
        it "returns the stored entity with its assigned id" {
            let saved = db.save_calculation(input("5 + 3", "8")).expect("Failed to save");

            assert_eq!(saved.expression, "5 + 3");
            assert_eq!(saved.result, "8");
            assert!(saved.id >= 1);
        }

        it "assigns increasing ids in insertion order" {
            let first = db.save_calculation(input("1 + 1", "2")).expect("Failed to save");
            let second = db.save_calculation(input("2 + 2", "4")).expect("Failed to save");

            assert!(second.id > first.id);
        }
    }

    describe "get_calculations" {
        it "returns empty list when the log is empty" {
            let calculations = db.get_calculations().expect("Query failed");
            assert!(calculations.is_empty());
        }

        it "returns calculations in insertion order" {
            db.save_calculation(input("1 + 1", "2")).expect("Failed to save");
            db.save_calculation(input("2 + 2", "4")).expect("Failed to save");
            db.save_calculation(input("3 + 3", "6")).expect("Failed to save");

            let calculations = db.get_calculations().expect("Query failed");
            assert_eq!(calculations.len(), 3);
            assert_eq!(calculations[0].expression, "1 + 1");
            assert_eq!(calculations[2].expression, "3 + 3");
            assert!(calculations[0].id < calculations[1].id);
            assert!(calculations[1].id < calculations[2].id);
        }
    }

    describe "get_recent_calculations" {
        it "returns newest first" {
            db.save_calculation(input("1 + 1", "2")).expect("Failed to save");
            db.save_calculation(input("2 + 2", "4")).expect("Failed to save");

            let recent = db.get_recent_calculations(10).expect("Query failed");
            assert_eq!(recent.len(), 2);
            assert_eq!(recent[0].expression, "2 + 2");
            assert_eq!(recent[1].expression, "1 + 1");
        }

        it "never returns more than the limit" {
            for i in 0..5 {
                db.save_calculation(input(&format!("{} + 0", i), &i.to_string()))
                    .expect("Failed to save");
            }

            let recent = db.get_recent_calculations(3).expect("Query failed");
            assert_eq!(recent.len(), 3);
            assert_eq!(recent[0].result, "4");
        }

        it "returns the just-saved record as the sole element with limit one" {
            db.save_calculation(input("1 + 1", "2")).expect("Failed to save");
            let saved = db.save_calculation(input("6 × 7", "42")).expect("Failed to save");

            let recent = db.get_recent_calculations(1).expect("Query failed");
            assert_eq!(recent.len(), 1);
            assert_eq!(recent[0].id, saved.id);
            assert_eq!(recent[0].result, "42");
        }
    }
}

#[test]
fn open_creates_parent_directories_and_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("tally.db");

    let db = Database::open(path.clone()).expect("Failed to open database");
    db.migrate().expect("Failed to migrate");
    db.save_calculation(input("5 + 3", "8")).expect("Failed to save");
    drop(db);

    let db = Database::open(path).expect("Failed to reopen database");
    db.migrate().expect("Migrations should be idempotent");

    let calculations = db.get_calculations().expect("Query failed");
    assert_eq!(calculations.len(), 1);
    assert_eq!(calculations[0].expression, "5 + 3");
}
