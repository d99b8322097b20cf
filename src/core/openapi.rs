use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::citizens::{dtos as citizens_dtos, handlers as citizens_handlers};
use crate::features::complaints::{dtos as complaints_dtos, handlers as complaints_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::departments::{dtos as departments_dtos, handlers as departments_handlers};
use crate::features::files::{
    dtos as files_dtos, handlers as files_handlers, models as files_models,
};
use crate::features::grievances::{dtos as grievances_dtos, handlers as grievances_handlers};
use crate::features::grievances::GrievanceStatus;
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
};
use crate::features::officers::{dtos as officers_dtos, handlers as officers_handlers, OfficerRank};
use crate::features::statuses::{
    dtos as statuses_dtos, handlers as statuses_handlers, ComplaintStatus,
};
use crate::shared::types::Meta;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register_citizen,
        auth::handlers::register_officer,
        auth::handlers::login,
        auth::handlers::get_me,
        auth::handlers::change_password,
        // Departments
        departments_handlers::list_departments,
        departments_handlers::get_department,
        departments_handlers::create_department,
        departments_handlers::update_department,
        departments_handlers::delete_department,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Citizens
        citizens_handlers::get_my_profile,
        citizens_handlers::update_my_profile,
        citizens_handlers::list_citizens,
        citizens_handlers::get_citizen,
        citizens_handlers::delete_citizen,
        // Officers
        officers_handlers::get_my_profile,
        officers_handlers::update_my_profile,
        officers_handlers::list_officers,
        officers_handlers::list_pending_officers,
        officers_handlers::get_officer,
        officers_handlers::approve_officer,
        officers_handlers::update_officer,
        officers_handlers::delete_officer,
        // Statuses
        statuses_handlers::list_statuses,
        // Complaints
        complaints_handlers::create_complaint,
        complaints_handlers::list_my_complaints,
        complaints_handlers::get_complaint,
        complaints_handlers::update_complaint,
        complaints_handlers::withdraw_complaint,
        complaints_handlers::close_my_complaint,
        complaints_handlers::list_assigned_complaints,
        complaints_handlers::update_complaint_status,
        complaints_handlers::list_complaints,
        complaints_handlers::assign_complaint,
        complaints_handlers::list_complaint_assignments,
        complaints_handlers::close_complaint,
        // Grievances
        grievances_handlers::create_grievance,
        grievances_handlers::list_my_grievances,
        grievances_handlers::get_grievance,
        grievances_handlers::list_escalated_grievances,
        grievances_handlers::respond_to_grievance,
        grievances_handlers::list_grievances,
        // Notifications
        notifications_handlers::list_notifications,
        notifications_handlers::unread_count,
        notifications_handlers::mark_read,
        notifications_handlers::mark_all_read,
        // Files
        files_handlers::upload_file,
        files_handlers::delete_file_by_url,
        // Dashboard
        dashboard_handlers::get_admin_dashboard,
        dashboard_handlers::get_officer_dashboard,
        dashboard_handlers::get_citizen_dashboard,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::UserRole,
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterCitizenRequestDto,
            auth::dtos::RegisterOfficerRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::ChangePasswordRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            // Departments and categories
            departments_dtos::DepartmentRequestDto,
            departments_dtos::DepartmentResponseDto,
            categories_dtos::CategoryRequestDto,
            categories_dtos::CategoryResponseDto,
            // Citizens and officers
            citizens_dtos::UpdateCitizenProfileDto,
            citizens_dtos::CitizenResponseDto,
            OfficerRank,
            officers_dtos::UpdateOfficerProfileDto,
            officers_dtos::UpdateOfficerPlacementDto,
            officers_dtos::OfficerResponseDto,
            // Complaints
            ComplaintStatus,
            statuses_dtos::StatusResponseDto,
            complaints_dtos::ComplaintRequestDto,
            complaints_dtos::UpdateComplaintStatusDto,
            complaints_dtos::ComplaintResponseDto,
            complaints_dtos::AssignComplaintDto,
            complaints_dtos::AssignmentResponseDto,
            // Grievances
            GrievanceStatus,
            grievances_dtos::CreateGrievanceDto,
            grievances_dtos::RespondGrievanceDto,
            grievances_dtos::GrievanceResponseDto,
            // Notifications
            notifications_dtos::NotificationResponseDto,
            notifications_dtos::UnreadCountDto,
            notifications_dtos::MarkAllReadDto,
            // Files
            files_models::FilePurpose,
            files_dtos::UploadFileDto,
            files_dtos::FileResponseDto,
            files_dtos::DeleteFileByUrlDto,
            files_dtos::DeleteFileResponseDto,
            // Dashboard
            dashboard_dtos::StatusCountDto,
            dashboard_dtos::DepartmentCountDto,
            dashboard_dtos::AdminDashboardDto,
            dashboard_dtos::OfficerDashboardDto,
            dashboard_dtos::CitizenDashboardDto,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and password management"),
        (name = "departments", description = "Government departments"),
        (name = "categories", description = "Complaint categories per department"),
        (name = "citizens", description = "Citizen profiles"),
        (name = "officers", description = "Officer profiles, approval and placement"),
        (name = "statuses", description = "Complaint status lookup"),
        (name = "complaints", description = "Filing, assignment and resolution of complaints"),
        (name = "grievances", description = "Escalation of unsatisfactory resolutions"),
        (name = "notifications", description = "In-app notifications for citizens and officers"),
        (name = "files", description = "Complaint images and proof documents"),
        (name = "dashboard", description = "Complaint statistics per role"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Complaint Portal API",
        version = "0.1.0",
        description = "API documentation for the citizen complaint management portal",
    )
)]
pub struct ApiDoc;

/// Adds the Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
