use crate::commands::{CmdMessage, CmdResult, ContactUpdate};
use crate::error::{MilkbarError, Result};
use crate::model::Client;
use crate::store::DataStore;

use super::helpers::require_name;

pub fn add<S: DataStore>(store: &mut S, name: String, phone: Option<String>) -> Result<CmdResult> {
    require_name(&name, "Client")?;

    let mut data = store.load()?;
    let client = Client::new(data.next_client_id(), name, phone);
    data.clients.push(client.clone());
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Client added ({}): {}",
        client.id, client.name
    )));
    result.clients.push(client);
    Ok(result)
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let data = store.load()?;
    Ok(CmdResult::default().with_clients(data.clients))
}

pub fn update<S: DataStore>(store: &mut S, id: u32, update: ContactUpdate) -> Result<CmdResult> {
    if let Some(name) = &update.name {
        require_name(name, "Client")?;
    }

    let mut data = store.load()?;
    let client = data.client_mut(id).ok_or(MilkbarError::NotFound {
        entity: "client",
        id,
    })?;

    if let Some(name) = update.name {
        client.name = name;
    }
    if let Some(phone) = update.phone {
        client.phone = Some(phone);
    }
    let updated = client.clone();
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Client updated ({}): {}",
        updated.id, updated.name
    )));
    result.clients.push(updated);
    Ok(result)
}

pub fn remove<S: DataStore>(store: &mut S, id: u32) -> Result<CmdResult> {
    let mut data = store.load()?;
    let name = data
        .client(id)
        .map(|c| c.name.clone())
        .ok_or(MilkbarError::NotFound {
            entity: "client",
            id,
        })?;

    if let Some(referenced_by) = data.client_referenced_by(id) {
        return Err(MilkbarError::ReferencedEntity {
            entity: "client",
            id,
            referenced_by,
        });
    }

    data.clients.retain(|c| c.id != id);
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Client removed ({}): {}",
        id, name
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sales;
    use crate::commands::sales::SaleLine;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn add_and_list() {
        let mut store = InMemoryStore::new();
        add(&mut store, "Jane Doe".into(), Some("0711222333".into())).unwrap();
        add(&mut store, "Kamau".into(), None).unwrap();

        let result = list(&store).unwrap();
        assert_eq!(result.clients.len(), 2);
        assert_eq!(result.clients[1].id, 2);
        assert_eq!(result.clients[1].phone, None);
    }

    #[test]
    fn update_phone_keeps_name() {
        let mut store = StoreFixture::new().with_client("Jane Doe").store;

        update(
            &mut store,
            1,
            ContactUpdate {
                phone: Some("0700111222".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let data = store.load().unwrap();
        assert_eq!(data.clients[0].name, "Jane Doe");
        assert_eq!(data.clients[0].phone.as_deref(), Some("0700111222"));
    }

    #[test]
    fn remove_fails_when_client_has_sales() {
        let mut store = StoreFixture::new()
            .with_product("Fresh Milk", 60.0, "liter", 100.0)
            .with_client("Jane Doe")
            .store;
        sales::record(
            &mut store,
            Some(1),
            &[SaleLine {
                product_id: 1,
                quantity: 1.0,
                price_per_unit: None,
            }],
        )
        .unwrap();

        let err = remove(&mut store, 1).unwrap_err();
        assert!(matches!(err, MilkbarError::ReferencedEntity { .. }));
        assert_eq!(store.load().unwrap().clients.len(), 1);
    }

    #[test]
    fn remove_without_sales_succeeds() {
        let mut store = StoreFixture::new().with_client("Kamau").store;
        remove(&mut store, 1).unwrap();
        assert!(store.load().unwrap().clients.is_empty());
    }
}
