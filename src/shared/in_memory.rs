//! In-memory stand-ins for every repository, shared by service and handler tests.
//!
//! Joined columns (department names, officer names, emails, the active
//! assignment) are computed on read the same way the SQL joins produce them.

use async_trait::async_trait;
use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, NewUser, User, UserRole};
use crate::features::auth::AccountRepository;
use crate::features::categories::models::{Category, CategoryInput};
use crate::features::categories::CategoryRepository;
use crate::features::citizens::models::{Citizen, CitizenProfileInput, NewCitizen};
use crate::features::citizens::CitizenRepository;
use crate::features::complaints::models::{
    Complaint, ComplaintAssignment, ComplaintDetails, ComplaintFilter, NewAssignment,
    NewComplaint, StatusChange,
};
use crate::features::complaints::services::format_reference_number;
use crate::features::complaints::{AssignmentRepository, ComplaintRepository};
use crate::features::dashboard::models::{DashboardScope, DepartmentCount, StatusCount};
use crate::features::dashboard::DashboardRepository;
use crate::features::departments::models::{Department, DepartmentInput};
use crate::features::departments::DepartmentRepository;
use crate::features::files::models::{FilePurpose, NewStoredFile, StoredFile};
use crate::features::files::FileRepository;
use crate::features::grievances::models::{
    Grievance, GrievanceFilter, GrievanceStatus, NewGrievance,
};
use crate::features::grievances::GrievanceRepository;
use crate::features::notifications::models::{Notification, Recipient};
use crate::features::notifications::NotificationRepository;
use crate::features::officers::models::{
    NewOfficer, Officer, OfficerFilter, OfficerPlacementInput, OfficerProfileInput,
};
use crate::features::officers::{OfficerRank, OfficerRepository};
use crate::features::statuses::models::StatusDefinition;
use crate::features::statuses::{ComplaintStatus, StatusRepository};
use crate::modules::storage::FileStorage;
use crate::shared::types::{Page, PaginationQuery};

/// Hash that never verifies, so seeded accounts cannot log in by accident
const UNUSABLE_HASH: &str = "$argon2id$seeded";

#[derive(Default)]
struct State {
    users: Vec<User>,
    departments: Vec<Department>,
    categories: Vec<Category>,
    citizens: Vec<Citizen>,
    officers: Vec<Officer>,
    complaints: Vec<Complaint>,
    assignments: Vec<ComplaintAssignment>,
    grievances: Vec<Grievance>,
    notifications: Vec<Notification>,
    files: Vec<StoredFile>,
    reference_seq: i64,
}

impl State {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn email_taken(&self, email: &str) -> bool {
        self.users
            .iter()
            .any(|u| u.email.to_lowercase() == email.to_lowercase())
    }

    fn department_name(&self, id: Uuid) -> String {
        self.departments
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.clone())
            .unwrap_or_default()
    }

    fn officer_name(&self, id: Uuid) -> String {
        self.officers
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.full_name.clone())
            .unwrap_or_default()
    }

    fn department_name_taken(&self, name: &str, except: Option<Uuid>) -> bool {
        self.departments.iter().any(|d| {
            d.is_active && Some(d.id) != except && d.name.to_lowercase() == name.to_lowercase()
        })
    }

    fn category_name_taken(&self, input: &CategoryInput, except: Option<Uuid>) -> bool {
        self.categories.iter().any(|c| {
            c.is_active
                && Some(c.id) != except
                && c.department_id == input.department_id
                && c.name.to_lowercase() == input.name.to_lowercase()
        })
    }

    fn category(&self, row: &Category) -> Category {
        Category {
            department_name: self.department_name(row.department_id),
            ..row.clone()
        }
    }

    fn citizen(&self, row: &Citizen) -> Citizen {
        Citizen {
            email: self.user(row.user_id).map(|u| u.email.clone()).unwrap_or_default(),
            ..row.clone()
        }
    }

    fn officer(&self, row: &Officer) -> Officer {
        Officer {
            email: self.user(row.user_id).map(|u| u.email.clone()).unwrap_or_default(),
            department_name: self.department_name(row.department_id),
            ..row.clone()
        }
    }

    fn active_assignment(&self, complaint_id: Uuid) -> Option<&ComplaintAssignment> {
        self.assignments
            .iter()
            .find(|a| a.complaint_id == complaint_id && a.is_active)
    }

    fn complaint(&self, row: &Complaint) -> Complaint {
        Complaint {
            citizen_name: self
                .citizens
                .iter()
                .find(|c| c.id == row.citizen_id)
                .map(|c| c.full_name.clone())
                .unwrap_or_default(),
            department_name: self.department_name(row.department_id),
            category_name: self
                .categories
                .iter()
                .find(|c| c.id == row.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            assigned_officer_id: self.active_assignment(row.id).map(|a| a.officer_id),
            ..row.clone()
        }
    }

    fn assignment(&self, row: &ComplaintAssignment) -> ComplaintAssignment {
        ComplaintAssignment {
            officer_name: self.officer_name(row.officer_id),
            ..row.clone()
        }
    }

    fn grievance(&self, row: &Grievance) -> Grievance {
        Grievance {
            reference_number: self
                .complaints
                .iter()
                .find(|c| c.id == row.complaint_id)
                .map(|c| c.reference_number.clone())
                .unwrap_or_default(),
            original_officer_name: self.officer_name(row.original_officer_id),
            escalated_officer_name: self.officer_name(row.escalated_officer_id),
            ..row.clone()
        }
    }

    fn open_grievances_for(&self, officer_id: Uuid) -> usize {
        self.grievances
            .iter()
            .filter(|g| g.is_active && g.escalated_officer_id == officer_id && g.status.is_open())
            .count()
    }

    fn matches_complaint(&self, c: &Complaint, filter: &ComplaintFilter) -> bool {
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        c.is_active
            && filter.citizen_id.is_none_or(|id| c.citizen_id == id)
            && filter
                .officer_id
                .is_none_or(|id| self.active_assignment(c.id).map(|a| a.officer_id) == Some(id))
            && filter.status.is_none_or(|s| c.status == s)
            && filter.department_id.is_none_or(|id| c.department_id == id)
            && filter.category_id.is_none_or(|id| c.category_id == id)
            && search.is_none_or(|s| {
                c.reference_number.to_lowercase().contains(&s)
                    || c.title.to_lowercase().contains(&s)
                    || c.description.to_lowercase().contains(&s)
            })
    }

    fn insert_user(&mut self, user: &NewUser) -> Result<User> {
        if self.email_taken(&user.email) {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }
        let now = Utc::now();
        let row = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.push(row.clone());
        Ok(row)
    }

    fn insert_citizen(&mut self, user: &User, citizen: &NewCitizen) -> Citizen {
        let now = Utc::now();
        let row = Citizen {
            id: Uuid::new_v4(),
            user_id: user.id,
            email: user.email.clone(),
            full_name: citizen.full_name.clone(),
            phone: citizen.phone.clone(),
            address: citizen.address.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.citizens.push(row.clone());
        row
    }

    fn insert_officer(
        &mut self,
        user: &User,
        officer: &NewOfficer,
        rank: OfficerRank,
        approved: bool,
    ) -> Officer {
        let now = Utc::now();
        let row = Officer {
            id: Uuid::new_v4(),
            user_id: user.id,
            email: user.email.clone(),
            department_id: officer.department_id,
            department_name: self.department_name(officer.department_id),
            full_name: officer.full_name.clone(),
            phone: officer.phone.clone(),
            rank,
            is_approved: approved,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.officers.push(row.clone());
        row
    }
}

/// Newest first; ties keep the most recently inserted row first
fn newest_first<T: Clone>(rows: impl DoubleEndedIterator<Item = T>, key: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut rows: Vec<T> = rows.rev().collect();
    rows.sort_by_key(|r| std::cmp::Reverse(key(r)));
    rows
}

fn paginate<T>(items: Vec<T>, page: PaginationQuery) -> Page<T> {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    Page::new(items, total)
}

pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::default()),
        })
    }

    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    // ---------------------------------------------------------------------
    // Seeding and inspection
    // ---------------------------------------------------------------------

    pub fn seed_department(&self, name: &str) -> Department {
        self.with(|s| {
            let now = Utc::now();
            let row = Department {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: None,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            s.departments.push(row.clone());
            row
        })
    }

    /// Department row whether or not it is still active
    pub fn department_row(&self, id: Uuid) -> Option<Department> {
        self.with(|s| s.departments.iter().find(|d| d.id == id).cloned())
    }

    pub fn seed_category(&self, department_id: Uuid, name: &str) -> Category {
        self.with(|s| {
            let now = Utc::now();
            let row = Category {
                id: Uuid::new_v4(),
                department_id,
                department_name: s.department_name(department_id),
                name: name.to_string(),
                description: None,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            s.categories.push(row.clone());
            row
        })
    }

    pub fn seed_citizen(&self, full_name: &str) -> (AuthenticatedUser, Citizen) {
        self.with(|s| {
            let user = s
                .insert_user(&NewUser {
                    email: SafeEmail().fake(),
                    password_hash: UNUSABLE_HASH.to_string(),
                    role: UserRole::Citizen,
                })
                .unwrap();
            let citizen = s.insert_citizen(
                &user,
                &NewCitizen {
                    full_name: full_name.to_string(),
                    phone: None,
                    address: None,
                },
            );
            (principal(&user), citizen)
        })
    }

    pub fn seed_officer(
        &self,
        full_name: &str,
        department_id: Uuid,
        rank: OfficerRank,
        approved: bool,
    ) -> (AuthenticatedUser, Officer) {
        self.with(|s| {
            let user = s
                .insert_user(&NewUser {
                    email: SafeEmail().fake(),
                    password_hash: UNUSABLE_HASH.to_string(),
                    role: UserRole::Officer,
                })
                .unwrap();
            let officer = s.insert_officer(
                &user,
                &NewOfficer {
                    department_id,
                    full_name: full_name.to_string(),
                    phone: None,
                },
                rank,
                approved,
            );
            (principal(&user), officer)
        })
    }

    pub fn approve_officer(&self, id: Uuid) {
        self.with(|s| {
            if let Some(officer) = s.officers.iter_mut().find(|o| o.id == id) {
                officer.is_approved = true;
            }
        })
    }

    /// Principal for the account behind an officer profile
    pub fn user_for_officer(&self, officer_id: Uuid) -> AuthenticatedUser {
        self.with(|s| {
            let officer = s.officers.iter().find(|o| o.id == officer_id).unwrap();
            principal(s.user(officer.user_id).unwrap())
        })
    }

    pub fn user_row(&self, user_id: Uuid) -> Option<User> {
        self.with(|s| s.user(user_id).cloned())
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.with(|s| {
            s.users
                .iter()
                .find(|u| u.email.to_lowercase() == email.to_lowercase())
                .cloned()
        })
    }

    pub fn set_password_hash(&self, user_id: Uuid, password_hash: &str) {
        self.with(|s| {
            if let Some(user) = s.users.iter_mut().find(|u| u.id == user_id) {
                user.password_hash = password_hash.to_string();
            }
        })
    }

    pub fn deactivate_user(&self, user_id: Uuid) {
        self.with(|s| {
            if let Some(user) = s.users.iter_mut().find(|u| u.id == user_id) {
                user.is_active = false;
            }
        })
    }

    /// Every notification addressed to `recipient`, oldest first
    pub fn notifications_for(&self, recipient: Recipient) -> Vec<Notification> {
        self.with(|s| {
            s.notifications
                .iter()
                .filter(|n| recipient.matches(n))
                .cloned()
                .collect()
        })
    }

    /// An active upload owned by `uploaded_by`
    pub fn seed_file(&self, uploaded_by: Uuid, purpose: FilePurpose) -> StoredFile {
        self.with(|s| {
            let now = Utc::now();
            let id = Uuid::new_v4();
            let file_key = format!("{}/{}/{}.png", purpose.as_str(), uploaded_by, id);
            let row = StoredFile {
                id,
                url: format!("http://files.test/{}", file_key),
                file_key,
                original_filename: "evidence.png".to_string(),
                content_type: "image/png".to_string(),
                file_size: 1024,
                purpose: purpose.as_str().to_string(),
                uploaded_by,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            s.files.push(row.clone());
            row
        })
    }

    /// A Pending complaint in the category's department
    pub fn seed_complaint(&self, citizen_id: Uuid, category: &Category) -> Complaint {
        self.with(|s| {
            s.reference_seq += 1;
            let now = Utc::now();
            let row = Complaint {
                id: Uuid::new_v4(),
                reference_number: format_reference_number(2025, s.reference_seq),
                citizen_id,
                citizen_name: String::new(),
                department_id: category.department_id,
                department_name: String::new(),
                category_id: category.id,
                category_name: String::new(),
                title: "Pothole near the market".to_string(),
                description: "A deep pothole has opened up near the market entrance".to_string(),
                location: None,
                image_url: None,
                status: ComplaintStatus::Pending,
                assigned_officer_id: None,
                is_active: true,
                resolved_at: None,
                closed_at: None,
                created_at: now,
                updated_at: now,
            };
            s.complaints.push(row.clone());
            s.complaint(&row)
        })
    }

    /// Make `officer_id` the active officer, releasing any previous assignment
    pub fn seed_assignment(&self, complaint_id: Uuid, officer_id: Uuid) -> ComplaintAssignment {
        self.with(|s| {
            let now = Utc::now();
            for a in s
                .assignments
                .iter_mut()
                .filter(|a| a.complaint_id == complaint_id && a.is_active)
            {
                a.is_active = false;
            }
            let row = ComplaintAssignment {
                id: Uuid::new_v4(),
                complaint_id,
                officer_id,
                officer_name: String::new(),
                assigned_by: Uuid::new_v4(),
                remarks: None,
                proof_url: None,
                is_active: true,
                assigned_at: now,
                updated_at: now,
            };
            s.assignments.push(row.clone());
            s.assignment(&row)
        })
    }

    pub fn active_assignment(&self, complaint_id: Uuid) -> Option<ComplaintAssignment> {
        self.with(|s| s.active_assignment(complaint_id).map(|a| s.assignment(a)))
    }

    /// Force a status, bypassing transition rules
    pub fn set_complaint_status(&self, id: Uuid, status: ComplaintStatus) {
        self.with(|s| {
            if let Some(complaint) = s.complaints.iter_mut().find(|c| c.id == id) {
                complaint.status = status;
                match status {
                    ComplaintStatus::Resolved => complaint.resolved_at = Some(Utc::now()),
                    ComplaintStatus::Closed => complaint.closed_at = Some(Utc::now()),
                    _ => {}
                }
            }
        })
    }
}

fn principal(user: &User) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: user.id,
        email: user.email.clone(),
        role: user.role,
    }
}

// =============================================================================
// Departments and categories
// =============================================================================

#[async_trait]
impl DepartmentRepository for InMemoryStore {
    async fn list(&self, page: PaginationQuery) -> Result<Page<Department>> {
        self.with(|s| {
            let mut rows: Vec<Department> =
                s.departments.iter().filter(|d| d.is_active).cloned().collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(paginate(rows, page))
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>> {
        self.with(|s| {
            Ok(s.departments
                .iter()
                .find(|d| d.id == id && d.is_active)
                .cloned())
        })
    }

    async fn create(&self, input: &DepartmentInput) -> Result<Department> {
        self.with(|s| {
            if s.department_name_taken(&input.name, None) {
                return Err(AppError::Conflict(
                    "A department with this name already exists".to_string(),
                ));
            }
            let now = Utc::now();
            let row = Department {
                id: Uuid::new_v4(),
                name: input.name.clone(),
                description: input.description.clone(),
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            s.departments.push(row.clone());
            Ok(row)
        })
    }

    async fn update(&self, id: Uuid, input: &DepartmentInput) -> Result<Option<Department>> {
        self.with(|s| {
            if !s.departments.iter().any(|d| d.id == id && d.is_active) {
                return Ok(None);
            }
            if s.department_name_taken(&input.name, Some(id)) {
                return Err(AppError::Conflict(
                    "A department with this name already exists".to_string(),
                ));
            }
            let row = s.departments.iter_mut().find(|d| d.id == id).unwrap();
            row.name = input.name.clone();
            row.description = input.description.clone();
            row.updated_at = Utc::now();
            Ok(Some(row.clone()))
        })
    }

    async fn count_active_categories(&self, id: Uuid) -> Result<i64> {
        self.with(|s| {
            Ok(s.categories
                .iter()
                .filter(|c| c.department_id == id && c.is_active)
                .count() as i64)
        })
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        self.with(|s| {
            match s.departments.iter_mut().find(|d| d.id == id && d.is_active) {
                Some(row) => {
                    row.is_active = false;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(
        &self,
        department_id: Option<Uuid>,
        page: PaginationQuery,
    ) -> Result<Page<Category>> {
        self.with(|s| {
            let mut rows: Vec<Category> = s
                .categories
                .iter()
                .filter(|c| c.is_active && department_id.is_none_or(|id| c.department_id == id))
                .map(|c| s.category(c))
                .collect();
            rows.sort_by(|a, b| {
                (&a.department_name, &a.name).cmp(&(&b.department_name, &b.name))
            });
            Ok(paginate(rows, page))
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        self.with(|s| {
            Ok(s.categories
                .iter()
                .find(|c| c.id == id && c.is_active)
                .map(|c| s.category(c)))
        })
    }

    async fn create(&self, input: &CategoryInput) -> Result<Category> {
        self.with(|s| {
            if s.category_name_taken(input, None) {
                return Err(AppError::Conflict(
                    "A category with this name already exists in the department".to_string(),
                ));
            }
            let now = Utc::now();
            let row = Category {
                id: Uuid::new_v4(),
                department_id: input.department_id,
                department_name: String::new(),
                name: input.name.clone(),
                description: input.description.clone(),
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            s.categories.push(row.clone());
            Ok(s.category(&row))
        })
    }

    async fn update(&self, id: Uuid, input: &CategoryInput) -> Result<Option<Category>> {
        self.with(|s| {
            if !s.categories.iter().any(|c| c.id == id && c.is_active) {
                return Ok(None);
            }
            if s.category_name_taken(input, Some(id)) {
                return Err(AppError::Conflict(
                    "A category with this name already exists in the department".to_string(),
                ));
            }
            let row = s.categories.iter_mut().find(|c| c.id == id).unwrap();
            row.department_id = input.department_id;
            row.name = input.name.clone();
            row.description = input.description.clone();
            row.updated_at = Utc::now();
            let row = row.clone();
            Ok(Some(s.category(&row)))
        })
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        self.with(|s| {
            match s.categories.iter_mut().find(|c| c.id == id && c.is_active) {
                Some(row) => {
                    row.is_active = false;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}

// =============================================================================
// Accounts and profiles
// =============================================================================

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.user_by_email(email))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.user_row(id))
    }

    async fn admin_exists(&self) -> Result<bool> {
        self.with(|s| {
            Ok(s.users
                .iter()
                .any(|u| u.role == UserRole::Admin && u.is_active))
        })
    }

    async fn create_admin(&self, user: &NewUser) -> Result<User> {
        self.with(|s| s.insert_user(user))
    }

    async fn create_citizen_account(
        &self,
        user: &NewUser,
        citizen: &NewCitizen,
    ) -> Result<(User, Citizen)> {
        self.with(|s| {
            let user = s.insert_user(user)?;
            let citizen = s.insert_citizen(&user, citizen);
            Ok((user, citizen))
        })
    }

    async fn create_officer_account(
        &self,
        user: &NewUser,
        officer: &NewOfficer,
    ) -> Result<(User, Officer)> {
        self.with(|s| {
            let user = s.insert_user(user)?;
            let officer = s.insert_officer(&user, officer, OfficerRank::FieldOfficer, false);
            Ok((user, officer))
        })
    }

    async fn update_password_hash(&self, user_id: Uuid, password_hash: &str) -> Result<()> {
        self.set_password_hash(user_id, password_hash);
        Ok(())
    }
}

#[async_trait]
impl CitizenRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Citizen>> {
        self.with(|s| {
            Ok(s.citizens
                .iter()
                .find(|c| c.id == id && c.is_active)
                .map(|c| s.citizen(c)))
        })
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Citizen>> {
        self.with(|s| {
            Ok(s.citizens
                .iter()
                .find(|c| c.user_id == user_id && c.is_active)
                .map(|c| s.citizen(c)))
        })
    }

    async fn list(&self, search: Option<&str>, page: PaginationQuery) -> Result<Page<Citizen>> {
        let search = search.map(|q| q.trim().to_lowercase());
        self.with(|s| {
            let rows = s
                .citizens
                .iter()
                .filter(|c| c.is_active)
                .map(|c| s.citizen(c))
                .filter(|c| {
                    search.as_ref().is_none_or(|q| {
                        c.full_name.to_lowercase().contains(q) || c.email.to_lowercase().contains(q)
                    })
                });
            Ok(paginate(newest_first(rows.collect::<Vec<_>>().into_iter(), |c| c.created_at), page))
        })
    }

    async fn update_profile(
        &self,
        id: Uuid,
        input: &CitizenProfileInput,
    ) -> Result<Option<Citizen>> {
        self.with(|s| {
            let Some(row) = s.citizens.iter_mut().find(|c| c.id == id && c.is_active) else {
                return Ok(None);
            };
            row.full_name = input.full_name.clone();
            row.phone = input.phone.clone();
            row.address = input.address.clone();
            row.updated_at = Utc::now();
            let row = row.clone();
            Ok(Some(s.citizen(&row)))
        })
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        self.with(|s| {
            let Some(row) = s.citizens.iter_mut().find(|c| c.id == id && c.is_active) else {
                return Ok(false);
            };
            row.is_active = false;
            let user_id = row.user_id;
            if let Some(user) = s.users.iter_mut().find(|u| u.id == user_id) {
                user.is_active = false;
            }
            Ok(true)
        })
    }
}

#[async_trait]
impl OfficerRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Officer>> {
        self.with(|s| {
            Ok(s.officers
                .iter()
                .find(|o| o.id == id && o.is_active)
                .map(|o| s.officer(o)))
        })
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Officer>> {
        self.with(|s| {
            Ok(s.officers
                .iter()
                .find(|o| o.user_id == user_id && o.is_active)
                .map(|o| s.officer(o)))
        })
    }

    async fn list(&self, filter: &OfficerFilter, page: PaginationQuery) -> Result<Page<Officer>> {
        self.with(|s| {
            let rows: Vec<Officer> = s
                .officers
                .iter()
                .filter(|o| {
                    o.is_active
                        && filter.department_id.is_none_or(|id| o.department_id == id)
                        && filter.rank.is_none_or(|r| o.rank == r)
                        && filter.is_approved.is_none_or(|a| o.is_approved == a)
                })
                .map(|o| s.officer(o))
                .collect();
            Ok(paginate(newest_first(rows.into_iter(), |o| o.created_at), page))
        })
    }

    async fn approve(&self, id: Uuid) -> Result<Option<Officer>> {
        self.with(|s| {
            let Some(row) = s.officers.iter_mut().find(|o| o.id == id && o.is_active) else {
                return Ok(None);
            };
            row.is_approved = true;
            row.updated_at = Utc::now();
            let row = row.clone();
            Ok(Some(s.officer(&row)))
        })
    }

    async fn update_profile(
        &self,
        id: Uuid,
        input: &OfficerProfileInput,
    ) -> Result<Option<Officer>> {
        self.with(|s| {
            let Some(row) = s.officers.iter_mut().find(|o| o.id == id && o.is_active) else {
                return Ok(None);
            };
            row.full_name = input.full_name.clone();
            row.phone = input.phone.clone();
            row.updated_at = Utc::now();
            let row = row.clone();
            Ok(Some(s.officer(&row)))
        })
    }

    async fn update_placement(
        &self,
        id: Uuid,
        input: &OfficerPlacementInput,
    ) -> Result<Option<Officer>> {
        self.with(|s| {
            let Some(row) = s.officers.iter_mut().find(|o| o.id == id && o.is_active) else {
                return Ok(None);
            };
            row.department_id = input.department_id;
            row.rank = input.rank;
            row.updated_at = Utc::now();
            let row = row.clone();
            Ok(Some(s.officer(&row)))
        })
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        self.with(|s| {
            let Some(row) = s.officers.iter_mut().find(|o| o.id == id && o.is_active) else {
                return Ok(false);
            };
            row.is_active = false;
            let user_id = row.user_id;
            if let Some(user) = s.users.iter_mut().find(|u| u.id == user_id) {
                user.is_active = false;
            }
            for a in s
                .assignments
                .iter_mut()
                .filter(|a| a.officer_id == id && a.is_active)
            {
                a.is_active = false;
            }
            Ok(true)
        })
    }

    async fn find_escalation_candidate(
        &self,
        rank: OfficerRank,
        preferred_department: Uuid,
    ) -> Result<Option<Officer>> {
        self.with(|s| {
            Ok(s.officers
                .iter()
                .filter(|o| o.is_active && o.is_approved && o.rank == rank)
                .min_by_key(|o| {
                    (
                        o.department_id != preferred_department,
                        s.open_grievances_for(o.id),
                        o.created_at,
                    )
                })
                .map(|o| s.officer(o)))
        })
    }
}

// =============================================================================
// Notifications and statuses
// =============================================================================

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, recipient: Recipient, message: &str) -> Result<Notification> {
        self.with(|s| {
            let (citizen_id, officer_id) = recipient.columns();
            let row = Notification {
                id: Uuid::new_v4(),
                citizen_id,
                officer_id,
                message: message.to_string(),
                is_read: false,
                created_at: Utc::now(),
            };
            s.notifications.push(row.clone());
            Ok(row)
        })
    }

    async fn list(
        &self,
        recipient: Recipient,
        unread_only: bool,
        page: PaginationQuery,
    ) -> Result<Page<Notification>> {
        self.with(|s| {
            let rows = s
                .notifications
                .iter()
                .filter(|n| recipient.matches(n) && (!unread_only || !n.is_read))
                .cloned()
                .collect::<Vec<_>>();
            Ok(paginate(newest_first(rows.into_iter(), |n| n.created_at), page))
        })
    }

    async fn count_unread(&self, recipient: Recipient) -> Result<i64> {
        self.with(|s| {
            Ok(s.notifications
                .iter()
                .filter(|n| recipient.matches(n) && !n.is_read)
                .count() as i64)
        })
    }

    async fn mark_read(&self, id: Uuid, recipient: Recipient) -> Result<bool> {
        self.with(|s| {
            match s
                .notifications
                .iter_mut()
                .find(|n| n.id == id && recipient.matches(n))
            {
                Some(n) => {
                    n.is_read = true;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    async fn mark_all_read(&self, recipient: Recipient) -> Result<u64> {
        self.with(|s| {
            let mut updated = 0;
            for n in s
                .notifications
                .iter_mut()
                .filter(|n| recipient.matches(n) && !n.is_read)
            {
                n.is_read = true;
                updated += 1;
            }
            Ok(updated)
        })
    }
}

#[async_trait]
impl StatusRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<StatusDefinition>> {
        let descriptions = [
            "Filed by the citizen, waiting for an officer",
            "An assigned officer is working on it",
            "The assigned officer reported it as resolved",
            "Resolution confirmed, no further action",
        ];
        Ok(ComplaintStatus::ALL
            .into_iter()
            .zip(descriptions)
            .map(|(status, description)| StatusDefinition {
                id: status.id(),
                name: status.name().to_string(),
                description: description.to_string(),
            })
            .collect())
    }
}

// =============================================================================
// Complaints, assignments and grievances
// =============================================================================

#[async_trait]
impl ComplaintRepository for InMemoryStore {
    async fn next_reference_seq(&self) -> Result<i64> {
        self.with(|s| {
            s.reference_seq += 1;
            Ok(s.reference_seq)
        })
    }

    async fn create(&self, complaint: &NewComplaint) -> Result<Complaint> {
        self.with(|s| {
            let now = Utc::now();
            let details = &complaint.details;
            let row = Complaint {
                id: Uuid::new_v4(),
                reference_number: complaint.reference_number.clone(),
                citizen_id: complaint.citizen_id,
                citizen_name: String::new(),
                department_id: details.department_id,
                department_name: String::new(),
                category_id: details.category_id,
                category_name: String::new(),
                title: details.title.clone(),
                description: details.description.clone(),
                location: details.location.clone(),
                image_url: details.image_url.clone(),
                status: ComplaintStatus::Pending,
                assigned_officer_id: None,
                is_active: true,
                resolved_at: None,
                closed_at: None,
                created_at: now,
                updated_at: now,
            };
            s.complaints.push(row.clone());
            Ok(s.complaint(&row))
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>> {
        self.with(|s| {
            Ok(s.complaints
                .iter()
                .find(|c| c.id == id && c.is_active)
                .map(|c| s.complaint(c)))
        })
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
        page: PaginationQuery,
    ) -> Result<Page<Complaint>> {
        self.with(|s| {
            let rows: Vec<Complaint> = s
                .complaints
                .iter()
                .filter(|c| s.matches_complaint(c, filter))
                .map(|c| s.complaint(c))
                .collect();
            Ok(paginate(newest_first(rows.into_iter(), |c| c.created_at), page))
        })
    }

    async fn update_details(
        &self,
        id: Uuid,
        details: &ComplaintDetails,
    ) -> Result<Option<Complaint>> {
        self.with(|s| {
            let Some(row) = s.complaints.iter_mut().find(|c| {
                c.id == id && c.is_active && c.status == ComplaintStatus::Pending
            }) else {
                return Ok(None);
            };
            row.department_id = details.department_id;
            row.category_id = details.category_id;
            row.title = details.title.clone();
            row.description = details.description.clone();
            row.location = details.location.clone();
            row.image_url = details.image_url.clone();
            row.updated_at = Utc::now();
            let row = row.clone();
            Ok(Some(s.complaint(&row)))
        })
    }

    async fn withdraw(&self, id: Uuid) -> Result<bool> {
        self.with(|s| {
            let Some(row) = s.complaints.iter_mut().find(|c| {
                c.id == id && c.is_active && c.status == ComplaintStatus::Pending
            }) else {
                return Ok(false);
            };
            row.is_active = false;
            for a in s
                .assignments
                .iter_mut()
                .filter(|a| a.complaint_id == id && a.is_active)
            {
                a.is_active = false;
            }
            Ok(true)
        })
    }

    async fn update_status(&self, id: Uuid, change: &StatusChange) -> Result<Option<Complaint>> {
        self.with(|s| {
            let now = Utc::now();
            let Some(row) = s
                .complaints
                .iter_mut()
                .find(|c| c.id == id && c.is_active && c.status == change.from)
            else {
                return Ok(None);
            };
            row.status = change.to;
            match change.to {
                ComplaintStatus::Resolved => row.resolved_at = Some(now),
                ComplaintStatus::Closed => row.closed_at = Some(now),
                _ => {}
            }
            row.updated_at = now;
            let row = row.clone();

            if let Some(assignment) = s
                .assignments
                .iter_mut()
                .find(|a| a.complaint_id == id && a.is_active)
            {
                if let Some(remarks) = &change.remarks {
                    assignment.remarks = Some(remarks.clone());
                }
                if let Some(proof_url) = &change.proof_url {
                    assignment.proof_url = Some(proof_url.clone());
                }
                assignment.updated_at = now;
            }

            Ok(Some(s.complaint(&row)))
        })
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn find_active(&self, complaint_id: Uuid) -> Result<Option<ComplaintAssignment>> {
        Ok(self.active_assignment(complaint_id))
    }

    async fn find_latest(&self, complaint_id: Uuid) -> Result<Option<ComplaintAssignment>> {
        self.with(|s| {
            Ok(s.assignments
                .iter()
                .filter(|a| a.complaint_id == complaint_id)
                .max_by_key(|a| a.assigned_at)
                .map(|a| s.assignment(a)))
        })
    }

    async fn list_for_complaint(&self, complaint_id: Uuid) -> Result<Vec<ComplaintAssignment>> {
        self.with(|s| {
            Ok(s.assignments
                .iter()
                .filter(|a| a.complaint_id == complaint_id)
                .map(|a| s.assignment(a))
                .collect())
        })
    }

    async fn assign(&self, assignment: &NewAssignment) -> Result<ComplaintAssignment> {
        self.with(|s| {
            let now = Utc::now();
            for a in s
                .assignments
                .iter_mut()
                .filter(|a| a.complaint_id == assignment.complaint_id && a.is_active)
            {
                a.is_active = false;
                a.updated_at = now;
            }
            let row = ComplaintAssignment {
                id: Uuid::new_v4(),
                complaint_id: assignment.complaint_id,
                officer_id: assignment.officer_id,
                officer_name: String::new(),
                assigned_by: assignment.assigned_by,
                remarks: assignment.remarks.clone(),
                proof_url: None,
                is_active: true,
                assigned_at: now,
                updated_at: now,
            };
            s.assignments.push(row.clone());
            Ok(s.assignment(&row))
        })
    }
}

#[async_trait]
impl GrievanceRepository for InMemoryStore {
    async fn create(&self, grievance: &NewGrievance) -> Result<Grievance> {
        self.with(|s| {
            if s
                .grievances
                .iter()
                .any(|g| g.complaint_id == grievance.complaint_id)
            {
                return Err(AppError::Conflict(
                    "A grievance has already been filed for this complaint".to_string(),
                ));
            }
            let now = Utc::now();
            let row = Grievance {
                id: Uuid::new_v4(),
                complaint_id: grievance.complaint_id,
                reference_number: String::new(),
                citizen_id: grievance.citizen_id,
                original_officer_id: grievance.original_officer_id,
                original_officer_name: String::new(),
                escalated_officer_id: grievance.escalated_officer_id,
                escalated_officer_name: String::new(),
                reason: grievance.reason.clone(),
                status: GrievanceStatus::Open,
                response: None,
                responded_at: None,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            s.grievances.push(row.clone());
            Ok(s.grievance(&row))
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Grievance>> {
        self.with(|s| {
            Ok(s.grievances
                .iter()
                .find(|g| g.id == id && g.is_active)
                .map(|g| s.grievance(g)))
        })
    }

    async fn find_by_complaint(&self, complaint_id: Uuid) -> Result<Option<Grievance>> {
        self.with(|s| {
            Ok(s.grievances
                .iter()
                .find(|g| g.complaint_id == complaint_id)
                .map(|g| s.grievance(g)))
        })
    }

    async fn list(
        &self,
        filter: &GrievanceFilter,
        page: PaginationQuery,
    ) -> Result<Page<Grievance>> {
        self.with(|s| {
            let rows: Vec<Grievance> = s
                .grievances
                .iter()
                .filter(|g| {
                    g.is_active
                        && filter.citizen_id.is_none_or(|id| g.citizen_id == id)
                        && filter
                            .escalated_officer_id
                            .is_none_or(|id| g.escalated_officer_id == id)
                        && filter.status.is_none_or(|st| g.status == st)
                })
                .map(|g| s.grievance(g))
                .collect();
            Ok(paginate(newest_first(rows.into_iter(), |g| g.created_at), page))
        })
    }

    async fn respond(
        &self,
        id: Uuid,
        from: GrievanceStatus,
        to: GrievanceStatus,
        response: Option<&str>,
    ) -> Result<Option<Grievance>> {
        self.with(|s| {
            let now = Utc::now();
            let Some(row) = s
                .grievances
                .iter_mut()
                .find(|g| g.id == id && g.is_active && g.status == from)
            else {
                return Ok(None);
            };
            row.status = to;
            if let Some(response) = response {
                row.response = Some(response.to_string());
                row.responded_at = Some(now);
            }
            row.updated_at = now;
            let row = row.clone();
            Ok(Some(s.grievance(&row)))
        })
    }
}

// =============================================================================
// Dashboard and files
// =============================================================================

#[async_trait]
impl DashboardRepository for InMemoryStore {
    async fn complaints_by_status(&self, scope: DashboardScope) -> Result<Vec<StatusCount>> {
        self.with(|s| {
            let filter = ComplaintFilter {
                citizen_id: scope.citizen_id(),
                officer_id: scope.officer_id(),
                ..Default::default()
            };
            let mut counts: HashMap<ComplaintStatus, i64> = HashMap::new();
            for c in s.complaints.iter().filter(|c| s.matches_complaint(c, &filter)) {
                *counts.entry(c.status).or_default() += 1;
            }
            let mut rows: Vec<StatusCount> = counts
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect();
            rows.sort_by_key(|r| r.status.id());
            Ok(rows)
        })
    }

    async fn complaints_by_department(&self) -> Result<Vec<DepartmentCount>> {
        self.with(|s| {
            let mut rows: Vec<DepartmentCount> = s
                .departments
                .iter()
                .filter(|d| d.is_active)
                .map(|d| DepartmentCount {
                    department_id: d.id,
                    department_name: d.name.clone(),
                    count: s
                        .complaints
                        .iter()
                        .filter(|c| c.is_active && c.department_id == d.id)
                        .count() as i64,
                })
                .collect();
            rows.sort_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.department_name.cmp(&b.department_name))
            });
            Ok(rows)
        })
    }

    async fn pending_officer_approvals(&self) -> Result<i64> {
        self.with(|s| {
            Ok(s.officers
                .iter()
                .filter(|o| o.is_active && !o.is_approved)
                .count() as i64)
        })
    }

    async fn count_grievances(&self, scope: DashboardScope, open_only: bool) -> Result<i64> {
        self.with(|s| {
            Ok(s.grievances
                .iter()
                .filter(|g| {
                    g.is_active
                        && scope.citizen_id().is_none_or(|id| g.citizen_id == id)
                        && scope.officer_id().is_none_or(|id| g.escalated_officer_id == id)
                        && (!open_only || g.status.is_open())
                })
                .count() as i64)
        })
    }
}

#[async_trait]
impl FileRepository for InMemoryStore {
    async fn create(&self, file: &NewStoredFile) -> Result<StoredFile> {
        self.with(|s| {
            let now = Utc::now();
            let row = StoredFile {
                id: Uuid::new_v4(),
                file_key: file.file_key.clone(),
                original_filename: file.original_filename.clone(),
                content_type: file.content_type.clone(),
                file_size: file.file_size,
                url: file.url.clone(),
                purpose: file.purpose.as_str().to_string(),
                uploaded_by: file.uploaded_by,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            s.files.push(row.clone());
            Ok(row)
        })
    }

    async fn find_active_by_url(&self, url: &str) -> Result<Option<StoredFile>> {
        self.with(|s| {
            Ok(s.files
                .iter()
                .find(|f| f.url == url && f.is_active)
                .cloned())
        })
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        self.with(|s| {
            match s.files.iter_mut().find(|f| f.id == id && f.is_active) {
                Some(f) => {
                    f.is_active = false;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}

/// Object store kept in a map
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl FileStorage for MemoryStorage {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<()> {
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("http://files.test/{}", key)
    }
}
