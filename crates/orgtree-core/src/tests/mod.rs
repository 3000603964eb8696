
use crate::Record;

pub(super) fn rec(pairs: &[(&str, &str)]) -> Record {
    Record::from_pairs(pairs.iter().copied())
}

pub(super) fn employee(id: &str, manager: Option<&str>, name: &str) -> Record {
    let mut record = rec(&[("EMPLOYEENUMBER", id), ("FIRSTNAME", name)]);
    if let Some(manager) = manager {
        record.insert("SUPERVISORPARTYID", manager);
    }
    record
}
