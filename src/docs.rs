use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use hostelhub_auth::transport::{OWNER_COOKIE, STUDENT_COOKIE, SUPER_ADMIN_COOKIE};
use hostelhub_core::{PaginationMeta, PaginationParams};
use hostelhub_models::categories::{
    Category, CategoryDependents, CreateCategoryDto, PaginatedCategoriesResponse,
    UpdateCategoryDto,
};
use hostelhub_models::owners::{
    Owner, OwnerDependents, OwnerLoginDto, OwnerLoginResponse, OwnerSignupDto,
    OwnerSignupResponse, OwnerStatus, OwnerWithStats, PaginatedOwnersResponse, ResendOtpDto,
    UpdateOwnerDto, VerifyOtpDto,
};
use hostelhub_models::payments::{
    CreatePaymentDto, PaginatedPaymentsResponse, Payment, PaymentKind, PaymentReceipt,
};
use hostelhub_models::rents::{
    CreateRentDto, CurrentRentResponse, GenerateRentsResponse, PaginatedRentsResponse, Rent,
    RentSummary,
};
use hostelhub_models::students::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentDependents, StudentLoginDto,
    StudentLoginResponse, StudentStatus, UpdateStudentDto,
};
use hostelhub_models::super_admins::{
    SuperAdmin, SuperAdminLoginDto, SuperAdminLoginResponse, SuperAdminSignupDto,
    SuperAdminStatus,
};
use hostelhub_models::{MessageResponse, SessionResponse, TokenType};

use crate::modules::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::owners::controller::signup,
        crate::modules::owners::controller::verify_otp,
        crate::modules::owners::controller::resend_otp,
        crate::modules::owners::controller::login,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_category,
        crate::modules::categories::controller::update_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::rents::controller::get_current_rents,
        crate::modules::rents::controller::get_rents,
        crate::modules::rents::controller::get_rent,
        crate::modules::rents::controller::create_rent,
        crate::modules::rents::controller::generate_rents,
        crate::modules::payments::controller::create_payment,
        crate::modules::payments::controller::get_payments,
        crate::modules::portal::controller::login,
        crate::modules::portal::controller::get_my_rents,
        crate::modules::super_admin::controller::signup,
        crate::modules::super_admin::controller::login,
        crate::modules::super_admin::controller::get_owners,
        crate::modules::super_admin::controller::get_owner,
        crate::modules::super_admin::controller::update_owner,
        crate::modules::super_admin::controller::delete_owner,
        crate::modules::super_admin::controller::get_students,
        crate::modules::super_admin::controller::get_student,
        crate::modules::super_admin::controller::update_student,
        crate::modules::super_admin::controller::delete_student,
        crate::modules::session::controller::me,
        crate::modules::session::controller::logout,
    ),
    components(
        schemas(
            Owner,
            OwnerStatus,
            OwnerSignupDto,
            OwnerSignupResponse,
            VerifyOtpDto,
            ResendOtpDto,
            OwnerLoginDto,
            OwnerLoginResponse,
            OwnerWithStats,
            OwnerDependents,
            UpdateOwnerDto,
            PaginatedOwnersResponse,
            Category,
            CreateCategoryDto,
            UpdateCategoryDto,
            CategoryDependents,
            PaginatedCategoriesResponse,
            Student,
            StudentStatus,
            CreateStudentDto,
            UpdateStudentDto,
            StudentDependents,
            StudentLoginDto,
            StudentLoginResponse,
            PaginatedStudentsResponse,
            Rent,
            RentSummary,
            CreateRentDto,
            CurrentRentResponse,
            GenerateRentsResponse,
            PaginatedRentsResponse,
            Payment,
            PaymentKind,
            CreatePaymentDto,
            PaymentReceipt,
            PaginatedPaymentsResponse,
            SuperAdmin,
            SuperAdminStatus,
            SuperAdminSignupDto,
            SuperAdminLoginDto,
            SuperAdminLoginResponse,
            SessionResponse,
            TokenType,
            MessageResponse,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Owners", description = "Owner signup, phone verification and login"),
        (name = "Categories", description = "Rent categories of the logged-in owner"),
        (name = "Students", description = "Students of the logged-in owner"),
        (name = "Rents", description = "Monthly rents and billing"),
        (name = "Payments", description = "Payments credited against rents"),
        (name = "Student Portal", description = "Student login and own rents"),
        (name = "Super Admin", description = "Cross-tenant administration"),
        (name = "Session", description = "Current session and logout")
    ),
    info(
        title = "HostelHub API",
        version = "0.1.0",
        description = "Multi-tenant hostel management API: owners, students, monthly rents and payments."
    )
)]
pub struct ApiDoc;

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
            for (scheme, cookie) in [
                ("owner_cookie", OWNER_COOKIE),
                ("student_cookie", STUDENT_COOKIE),
                ("super_admin_cookie", SUPER_ADMIN_COOKIE),
            ] {
                components.add_security_scheme(
                    scheme,
                    SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(cookie))),
                );
            }
        }
    }
}
