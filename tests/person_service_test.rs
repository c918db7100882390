//! Integration tests for the person service
//!
//! Covers the cascading person/address write, its atomicity, the joined
//! reads and the update/delete rules.

mod common;

use person_registry::prelude::*;

#[tokio::test]
async fn test_person_lifecycle_with_existing_address() {
    let Some(registry) = common::registry().await else {
        return;
    };

    let address = registry
        .addresses()
        .create(Address::new("Godoy Cruz", "Mendoza"))
        .await
        .unwrap();
    assert!(address.id > 0);
    let fetched = registry.addresses().read(address.id).await.unwrap().unwrap();
    assert_eq!(fetched.locality, "Godoy Cruz");
    assert_eq!(fetched.region, "Mendoza");

    let person = registry
        .people()
        .create(Person::new("Juan Perez", 30, address.clone()))
        .await
        .unwrap();
    assert!(person.id > 0);

    let found = registry.people().find_by_id(person.id).await.unwrap();
    let found_address = found.address.clone().expect("joined address");
    assert_eq!(found_address.id, address.id);
    assert_eq!(found_address.locality, "Godoy Cruz");
    assert_eq!(found_address.region, "Mendoza");

    let mut older = found;
    older.age = 31;
    registry.people().update(older).await.unwrap();

    let reread = registry.people().find_by_id(person.id).await.unwrap();
    assert_eq!(reread.age, 31);
    assert_eq!(reread.name, "Juan Perez");

    registry.people().delete(person.id).await.unwrap();
    let missing = registry.people().find_by_id(person.id).await.unwrap_err();
    assert!(missing.is_not_found());
    assert!(matches!(missing, AppError::NotFound { .. }));

    registry.people().delete(person.id).await.unwrap();

    // The address outlives the person that referenced it
    assert!(registry.addresses().read(address.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_writes_one_address_and_one_person() {
    let Some(registry) = common::registry().await else {
        return;
    };
    let locality = common::unique_tag("loc");
    let name = common::unique_tag("name");

    let person = registry
        .people()
        .create(Person::new(name.clone(), 44, Address::new(locality.clone(), "Mendoza")))
        .await
        .unwrap();

    let address_id = person.address_id().expect("generated address id");
    assert!(address_id > 0);
    assert_eq!(common::count_rows(&registry, "address", "locality", &locality).await, 1);
    assert_eq!(common::count_rows(&registry, "person", "name", &name).await, 1);
    assert_eq!(
        common::stored_address_id(&registry, person.id).await,
        Some(address_id)
    );
}

#[tokio::test]
async fn test_update_with_unsaved_address_inserts_new_row() {
    let Some(registry) = common::registry().await else {
        return;
    };
    let first_locality = common::unique_tag("first");
    let second_locality = common::unique_tag("second");

    let person = registry
        .people()
        .create(Person::new("Ana Gomez", 27, Address::new(first_locality.clone(), "San Juan")))
        .await
        .unwrap();
    let first_address_id = person.address_id().unwrap();

    let mut moved = person.clone();
    moved.address = Some(Address::new(second_locality.clone(), "San Luis"));
    let moved = registry.people().update(moved).await.unwrap();

    let second_address_id = moved.address_id().unwrap();
    assert_ne!(second_address_id, first_address_id);
    assert_eq!(
        common::stored_address_id(&registry, person.id).await,
        Some(second_address_id)
    );

    let untouched = registry.addresses().find_by_id(first_address_id).await.unwrap();
    assert_eq!(untouched.locality, first_locality);
    assert_eq!(untouched.region, "San Juan");
    assert_eq!(common::count_rows(&registry, "address", "locality", &second_locality).await, 1);
}

#[tokio::test]
async fn test_update_rewrites_existing_address_in_place() {
    let Some(registry) = common::registry().await else {
        return;
    };
    let locality = common::unique_tag("before");
    let renamed = common::unique_tag("after");

    let person = registry
        .people()
        .create(Person::new("Luis Diaz", 52, Address::new(locality, "Salta")))
        .await
        .unwrap();
    let address_id = person.address_id().unwrap();

    let mut edited = person.clone();
    if let Some(address) = edited.address.as_mut() {
        address.locality = renamed.clone();
    }
    registry.people().update(edited).await.unwrap();

    let address = registry.addresses().find_by_id(address_id).await.unwrap();
    assert_eq!(address.locality, renamed);
    assert_eq!(
        common::stored_address_id(&registry, person.id).await,
        Some(address_id)
    );
}

#[tokio::test]
async fn test_failed_person_insert_rolls_back_address() {
    let Some(registry) = common::registry().await else {
        return;
    };
    let locality = common::unique_tag("rollback");

    // Longer than person.name's VARCHAR(100): the address insert succeeds,
    // the person insert then violates the column constraint.
    let too_long = "x".repeat(150);
    let result = registry
        .people()
        .create(Person::new(too_long, 30, Address::new(locality.clone(), "Mendoza")))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Store {
            operation: "create",
            source: StoreError::Query { .. },
            ..
        })
    ));
    assert_eq!(common::count_rows(&registry, "address", "locality", &locality).await, 0);
}

#[tokio::test]
async fn test_find_all_returns_joined_people() {
    let Some(registry) = common::registry().await else {
        return;
    };
    let name = common::unique_tag("everyone");

    let mut created = Vec::new();
    for age in [20, 30, 40] {
        let person = registry
            .people()
            .create(Person::new(name.clone(), age, Address::new(format!("Barrio {}", age), "Cordoba")))
            .await
            .unwrap();
        created.push(person.id);
    }

    let listed: Vec<Person> = registry
        .people()
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.name == name)
        .collect();

    assert_eq!(listed.len(), created.len());
    for person in &listed {
        assert!(created.contains(&person.id));
        let address = person.address.as_ref().expect("joined address");
        assert_eq!(address.region, "Cordoba");
        assert_eq!(address.locality, format!("Barrio {}", person.age));
    }
}

#[tokio::test]
async fn test_update_of_missing_person_is_not_found() {
    let Some(registry) = common::registry().await else {
        return;
    };

    let mut ghost = Person::new("Nadie", 40, Address::new(common::unique_tag("ghost"), "Jujuy"));
    ghost.id = i32::MAX;

    let error = registry.people().update(ghost).await.unwrap_err();
    assert!(matches!(error, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_of_missing_person_is_a_no_op() {
    let Some(registry) = common::registry().await else {
        return;
    };
    let name = common::unique_tag("keeper");

    let keeper = registry
        .people()
        .create(Person::new(name.clone(), 61, Address::new("Centro", "Neuquen")))
        .await
        .unwrap();

    registry.people().delete(i32::MAX).await.unwrap();

    assert!(registry.people().read(i32::MAX).await.unwrap().is_none());
    assert!(registry.people().read(keeper.id).await.unwrap().is_some());
    assert_eq!(common::count_rows(&registry, "person", "name", &name).await, 1);
}
