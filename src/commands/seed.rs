//! Seed command - Reference data and sample accounts.
//!
//! Idempotent: every record is looked up before insertion, so the command
//! can run repeatedly against the same database.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::config::{CASE_ACTION_CREATED, ROLE_ADMIN, ROLE_CLIENT, ROLE_EMPLOYEE};
use crate::domain::Password;
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::entities::{
    case, case_history, case_type, client_profile, employee_profile, user,
};
use crate::infra::Database;

/// Execute the seed command
pub async fn execute(config: crate::config::Config) -> AppResult<()> {
    tracing::info!("Seeding database...");

    let db = Database::connect(&config).await?;
    let conn = db.connection();

    let admin = ensure_user(conn, "admin@example.com", "Admin User", "admin123", ROLE_ADMIN).await?;
    println!("Created admin user: {}", admin.email);

    let transport = ensure_case_type(
        conn,
        "Emergency Transport",
        "Urgent medical transportation services",
    )
    .await?;
    let evacuation = ensure_case_type(
        conn,
        "Medical Evacuation",
        "International medical evacuation services",
    )
    .await?;
    let repatriation = ensure_case_type(
        conn,
        "Medical Repatriation",
        "Return transport to home country for medical treatment",
    )
    .await?;
    println!(
        "Created case types: {}, {}, {}",
        transport.name, evacuation.name, repatriation.name
    );

    let client1 = ensure_user(
        conn,
        "contact@insuranceco.com",
        "John Smith",
        "client123",
        ROLE_CLIENT,
    )
    .await?;
    let client1_profile = ensure_client_profile(
        conn,
        client1.id,
        "Global Insurance Co.",
        "John Smith",
        "+1234567890",
        "United States",
    )
    .await?;

    let client2 = ensure_user(
        conn,
        "contact@hospital.com",
        "Sarah Johnson",
        "client123",
        ROLE_CLIENT,
    )
    .await?;
    ensure_client_profile(
        conn,
        client2.id,
        "City General Hospital",
        "Sarah Johnson",
        "+1987654321",
        "Canada",
    )
    .await?;
    println!("Created client users: {}, {}", client1.email, client2.email);

    let employee = ensure_user(
        conn,
        "coordinator@gmca.com",
        "Michael Brown",
        "employee123",
        ROLE_EMPLOYEE,
    )
    .await?;
    let employee_profile =
        ensure_employee_profile(conn, employee.id, "Operations", "Case Coordinator").await?;
    println!("Created employee user: {}", employee.email);

    let sample = ensure_sample_case(
        conn,
        transport.id,
        client1_profile.id,
        admin.id,
        employee_profile.id,
    )
    .await?;
    if let Some(case) = sample {
        println!("Created sample case: {}", case.title);
    }

    tracing::info!("Seeding complete");
    Ok(())
}

async fn ensure_user(
    db: &DatabaseConnection,
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> AppResult<user::Model> {
    if let Some(existing) = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(AppError::from)?
    {
        return Ok(existing);
    }

    let now = chrono::Utc::now();
    let model = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(Password::new(password)?.into_string()),
        name: Set(name.to_string()),
        role: Set(role.to_string()),
        is_active: Set(true),
        two_factor_secret: Set(None),
        two_factor_enabled: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model.insert(db).await.map_err(AppError::from)
}

async fn ensure_case_type(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
) -> AppResult<case_type::Model> {
    if let Some(existing) = case_type::Entity::find()
        .filter(case_type::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(AppError::from)?
    {
        return Ok(existing);
    }

    let model = case_type::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        is_active: Set(true),
    };

    model.insert(db).await.map_err(AppError::from)
}

async fn ensure_client_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
    company_name: &str,
    contact_person: &str,
    phone_number: &str,
    country: &str,
) -> AppResult<client_profile::Model> {
    if let Some(existing) = client_profile::Entity::find()
        .filter(client_profile::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(AppError::from)?
    {
        return Ok(existing);
    }

    let model = client_profile::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        company_name: Set(company_name.to_string()),
        contact_person: Set(contact_person.to_string()),
        phone_number: Set(phone_number.to_string()),
        country: Set(country.to_string()),
    };

    model.insert(db).await.map_err(AppError::from)
}

async fn ensure_employee_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
    department: &str,
    position: &str,
) -> AppResult<employee_profile::Model> {
    if let Some(existing) = employee_profile::Entity::find()
        .filter(employee_profile::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(AppError::from)?
    {
        return Ok(existing);
    }

    let model = employee_profile::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        department: Set(department.to_string()),
        position: Set(position.to_string()),
    };

    model.insert(db).await.map_err(AppError::from)
}

/// Insert the sample case with its CREATED history entry, once.
async fn ensure_sample_case(
    db: &DatabaseConnection,
    case_type_id: Uuid,
    client_id: Uuid,
    created_by_id: Uuid,
    assigned_to_id: Uuid,
) -> AppResult<Option<case::Model>> {
    let title = "Emergency Medical Transport - Sample";

    if case::Entity::find()
        .filter(case::Column::Title.eq(title))
        .one(db)
        .await
        .map_err(AppError::from)?
        .is_some()
    {
        return Ok(None);
    }

    let now = chrono::Utc::now();
    let case_model = case::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set("Sample case for testing".to_string()),
        case_type_id: Set(case_type_id),
        client_id: Set(client_id),
        created_by_id: Set(created_by_id),
        assigned_to_id: Set(Some(assigned_to_id)),
        location: Set("New York, USA".to_string()),
        priority: Set("HIGH".to_string()),
        status: Set("OPEN".to_string()),
        symptoms: Set("Patient requires urgent medical transport".to_string()),
        required_assistance: Set("Ground ambulance with medical team".to_string()),
        medical_history: Set(Some("No significant medical history".to_string())),
        current_medications: Set(Some("None".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = case_model.insert(db).await.map_err(AppError::from)?;

    let history = case_history::ActiveModel {
        id: Set(Uuid::new_v4()),
        case_id: Set(inserted.id),
        user_id: Set(created_by_id),
        action: Set(CASE_ACTION_CREATED.to_string()),
        description: Set("Case created and assigned".to_string()),
        created_at: Set(now),
    };
    history.insert(db).await.map_err(AppError::from)?;

    Ok(Some(inserted))
}
