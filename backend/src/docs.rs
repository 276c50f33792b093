#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    error::ErrorResponse,
    handlers::{
        common::DateQuery,
        config::{HealthResponse, TimeZoneResponse},
        reports::ExportQuery,
    },
    models::{
        clock_event::{ClockEvent, ClockEventKind},
        day_status::{BreakStatus, ClockStatus, DayStatus, StatusResponse},
        employee::{CreateEmployee, Employee, EmployeeRole, UpdateEmployee},
        stats::DailyStats,
        PaginationQuery,
    },
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_doc,
        time_zone_doc,
        list_employees_doc,
        get_employee_doc,
        create_employee_doc,
        update_employee_doc,
        deactivate_employee_doc,
        delete_employee_doc,
        status_doc,
        toggle_clock_doc,
        toggle_break_doc,
        clock_in_doc,
        clock_out_doc,
        break_start_doc,
        break_end_doc,
        day_status_doc,
        events_doc,
        today_doc,
        stats_doc,
        export_doc
    ),
    components(
        schemas(
            // employees
            Employee,
            EmployeeRole,
            CreateEmployee,
            UpdateEmployee,
            // ledger
            ClockEvent,
            ClockEventKind,
            StatusResponse,
            ClockStatus,
            BreakStatus,
            DayStatus,
            // reports
            DailyStats,
            DateQuery,
            ExportQuery,
            PaginationQuery,
            // misc
            ErrorResponse,
            HealthResponse,
            TimeZoneResponse
        )
    ),
    tags(
        (name = "Employees", description = "Employee directory and PIN lookup"),
        (name = "Clock", description = "Clock and break punches, per-employee status"),
        (name = "Reports", description = "Daily table, fleet statistics and payroll export"),
        (name = "System", description = "Health and configuration")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = HealthResponse)),
    tag = "System"
)]
fn health_doc() {}

#[utoipa::path(
    get,
    path = "/api/config/timezone",
    responses((status = 200, body = TimeZoneResponse)),
    tag = "System"
)]
fn time_zone_doc() {}

#[utoipa::path(
    get,
    path = "/api/employee",
    responses((status = 200, body = [Employee])),
    tag = "Employees"
)]
fn list_employees_doc() {}

#[utoipa::path(
    get,
    path = "/api/employee/{id}",
    params(("id" = String, Path, description = "Employee PIN")),
    responses(
        (status = 200, body = Employee),
        (status = 404, description = "Unknown PIN", body = ErrorResponse)
    ),
    tag = "Employees"
)]
fn get_employee_doc() {}

#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = CreateEmployee,
    responses(
        (status = 201, body = Employee),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "PIN already issued", body = ErrorResponse)
    ),
    tag = "Employees"
)]
fn create_employee_doc() {}

#[utoipa::path(
    put,
    path = "/api/employee/{id}",
    params(("id" = String, Path, description = "Employee PIN")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, body = Employee),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "Employees"
)]
fn update_employee_doc() {}

#[utoipa::path(
    post,
    path = "/api/employee/{id}/deactivate",
    params(("id" = String, Path, description = "Employee PIN")),
    responses((status = 200, body = Employee), (status = 404, body = ErrorResponse)),
    tag = "Employees"
)]
fn deactivate_employee_doc() {}

#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    params(("id" = String, Path, description = "Employee PIN")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, body = ErrorResponse),
        (status = 409, description = "Employee has ledger history", body = ErrorResponse)
    ),
    tag = "Employees"
)]
fn delete_employee_doc() {}

#[utoipa::path(
    get,
    path = "/api/{id}/status",
    params(("id" = String, Path, description = "Employee PIN")),
    responses((status = 200, body = StatusResponse), (status = 404, body = ErrorResponse)),
    tag = "Clock"
)]
fn status_doc() {}

#[utoipa::path(
    post,
    path = "/api/{id}/clock",
    params(("id" = String, Path, description = "Employee PIN")),
    responses(
        (status = 200, description = "Clocked in or out", body = DayStatus),
        (status = 400, description = "On break", body = ErrorResponse),
        (status = 403, description = "Inactive employee", body = ErrorResponse)
    ),
    tag = "Clock"
)]
fn toggle_clock_doc() {}

#[utoipa::path(
    post,
    path = "/api/{id}/break",
    params(("id" = String, Path, description = "Employee PIN")),
    responses(
        (status = 200, description = "Break started or ended", body = DayStatus),
        (status = 400, description = "Not clocked in", body = ErrorResponse),
        (status = 403, description = "Inactive employee", body = ErrorResponse)
    ),
    tag = "Clock"
)]
fn toggle_break_doc() {}

#[utoipa::path(
    post,
    path = "/api/{id}/clock-in",
    params(("id" = String, Path, description = "Employee PIN")),
    responses((status = 200, body = DayStatus), (status = 400, body = ErrorResponse)),
    tag = "Clock"
)]
fn clock_in_doc() {}

#[utoipa::path(
    post,
    path = "/api/{id}/clock-out",
    params(("id" = String, Path, description = "Employee PIN")),
    responses((status = 200, body = DayStatus), (status = 400, body = ErrorResponse)),
    tag = "Clock"
)]
fn clock_out_doc() {}

#[utoipa::path(
    post,
    path = "/api/{id}/break-start",
    params(("id" = String, Path, description = "Employee PIN")),
    responses((status = 200, body = DayStatus), (status = 400, body = ErrorResponse)),
    tag = "Clock"
)]
fn break_start_doc() {}

#[utoipa::path(
    post,
    path = "/api/{id}/break-end",
    params(("id" = String, Path, description = "Employee PIN")),
    responses((status = 200, body = DayStatus), (status = 400, body = ErrorResponse)),
    tag = "Clock"
)]
fn break_end_doc() {}

#[utoipa::path(
    get,
    path = "/api/{id}/today",
    params(("id" = String, Path, description = "Employee PIN"), DateQuery),
    responses((status = 200, body = DayStatus), (status = 404, body = ErrorResponse)),
    tag = "Clock"
)]
fn day_status_doc() {}

#[utoipa::path(
    get,
    path = "/api/{id}/events",
    params(("id" = String, Path, description = "Employee PIN"), DateQuery, PaginationQuery),
    responses((status = 200, description = "Paginated ledger events", body = serde_json::Value)),
    tag = "Clock"
)]
fn events_doc() {}

#[utoipa::path(
    get,
    path = "/api/today",
    params(DateQuery),
    responses((status = 200, body = [DayStatus])),
    tag = "Reports"
)]
fn today_doc() {}

#[utoipa::path(
    get,
    path = "/api/stats",
    params(DateQuery),
    responses((status = 200, body = DailyStats)),
    tag = "Reports"
)]
fn stats_doc() {}

#[utoipa::path(
    get,
    path = "/api/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "Payroll CSV attachment", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid range", body = ErrorResponse)
    ),
    tag = "Reports"
)]
fn export_doc() {}
