use crate::commands::{CmdMessage, CmdResult, ContactUpdate};
use crate::error::{MilkbarError, Result};
use crate::model::Supplier;
use crate::store::DataStore;

use super::helpers::require_name;

pub fn add<S: DataStore>(store: &mut S, name: String, phone: Option<String>) -> Result<CmdResult> {
    require_name(&name, "Supplier")?;

    let mut data = store.load()?;
    let supplier = Supplier::new(data.next_supplier_id(), name, phone);
    data.suppliers.push(supplier.clone());
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Supplier added ({}): {}",
        supplier.id, supplier.name
    )));
    result.suppliers.push(supplier);
    Ok(result)
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let data = store.load()?;
    Ok(CmdResult::default().with_suppliers(data.suppliers))
}

pub fn update<S: DataStore>(store: &mut S, id: u32, update: ContactUpdate) -> Result<CmdResult> {
    if let Some(name) = &update.name {
        require_name(name, "Supplier")?;
    }

    let mut data = store.load()?;
    let supplier = data.supplier_mut(id).ok_or(MilkbarError::NotFound {
        entity: "supplier",
        id,
    })?;

    if let Some(name) = update.name {
        supplier.name = name;
    }
    if let Some(phone) = update.phone {
        supplier.phone = Some(phone);
    }
    let updated = supplier.clone();
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Supplier updated ({}): {}",
        updated.id, updated.name
    )));
    result.suppliers.push(updated);
    Ok(result)
}

pub fn remove<S: DataStore>(store: &mut S, id: u32) -> Result<CmdResult> {
    let mut data = store.load()?;
    let name = data
        .supplier(id)
        .map(|s| s.name.clone())
        .ok_or(MilkbarError::NotFound {
            entity: "supplier",
            id,
        })?;

    if let Some(referenced_by) = data.supplier_referenced_by(id) {
        return Err(MilkbarError::ReferencedEntity {
            entity: "supplier",
            id,
            referenced_by,
        });
    }

    data.suppliers.retain(|s| s.id != id);
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Supplier removed ({}): {}",
        id, name
    )));
    Ok(result)
}
