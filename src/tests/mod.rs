//! A mock of the REST API, served by axum on an ephemeral port, and the
//! page tests running against it.


use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use hostel_client::{AccountInfo, Context, Session};
use hostel_shared::{
    account::{
        handle::{
            manage::{MakeSubadminDescriptor, TerminateDescriptor},
            AuthResult, LoginDescriptor, RegisterDescriptor,
        },
        Role, User,
    },
    booking::{
        handle::{BookingDescriptor, DisapproveDescriptor, KickDescriptor},
        Booking, BookingStatus,
    },
    chat::{
        handle::{SendMessageDescriptor, StartConversationDescriptor},
        Conversation, Message,
    },
    fee::{handle::FeeDescriptor, Fee, FeeStatus, FeeSummary},
    hostel::{
        handle::{EditHostelDescriptor, HostelDescriptor, HostelQuery},
        Hostel, RoomPricing,
    },
    report::{
        handle::{ReportDescriptor, ResolveDescriptor},
        Report, ReportStatus,
    },
    reservation::{
        handle::{ReservationDecision, ReservationDescriptor},
        Reservation, ReservationStatus,
    },
    verification::{
        handle::{ReviewDescriptor, VerificationDescriptor},
        ManagerVerification, VerificationStatus,
    },
    Envelope, HostelFor, Month, Ref,
};
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

pub(crate) const PASSWORD: &str = "password123";
pub(crate) const PNG: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A file the mock received in a multipart form.
#[derive(Debug, Clone)]
pub(crate) struct Upload {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

#[derive(Default)]
pub(crate) struct MockState {
    pub users: Vec<User>,
    /// Token to account id.
    pub tokens: HashMap<String, String>,
    pub hostels: Vec<Hostel>,
    pub bookings: Vec<Booking>,
    pub reservations: Vec<Reservation>,
    pub verifications: Vec<ManagerVerification>,
    pub fees: Vec<Fee>,
    pub fee_per_student: u32,
    pub reports: Vec<Report>,
    pub conversations: Vec<Conversation>,
    pub messages: Vec<Message>,

    /// Every request as `METHOD /path?query`.
    pub calls: Vec<String>,
    /// The `Authorization` header of each recorded call.
    pub authorization: Vec<Option<String>>,
    pub uploads: Vec<Upload>,
    /// The `data` field of the last multipart form.
    pub last_data: Option<Value>,
    /// Rejects the next request with this status and message.
    pub fail_next: Option<(StatusCode, Option<String>)>,
    next_id: u64,
}

fn user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: id.to_owned(),
        name: name.to_owned(),
        email: email.to_owned(),
        role,
        phone: None,
        is_terminated: false,
        termination_reason: None,
        created_at: None,
    }
}

fn pricing(room_type: &str, price_per_month: u32, available_rooms: u32) -> RoomPricing {
    RoomPricing {
        room_type: room_type.to_owned(),
        price_per_month,
        available_rooms,
    }
}

impl MockState {
    fn seeded() -> Self {
        let mut state = Self {
            users: vec![
                user("a1", "Admin", "admin@hostels.pk", Role::Admin),
                user("sa1", "Hina Raza", "hina@hostels.pk", Role::Subadmin),
                user("m1", "Bilal Ahmed", "bilal@example.com", Role::Manager),
                user("st1", "Ayesha Khan", "ayesha@example.com", Role::Student),
                user("st2", "Usman Ali", "usman@example.com", Role::Student),
            ],
            hostels: vec![
                Hostel {
                    id: "h1".to_owned(),
                    manager: Ref::Id("m1".to_owned()),
                    hostel_name: "Green Residency".to_owned(),
                    city: "Lahore".to_owned(),
                    address: "12 Canal Road".to_owned(),
                    hostel_type: HostelFor::Boys,
                    pricing: vec![pricing("single", 15000, 2), pricing("shared", 8000, 5)],
                    facilities: vec!["wifi".to_owned(), "mess".to_owned()],
                    description: None,
                    images: vec![],
                },
                Hostel {
                    id: "h2".to_owned(),
                    manager: Ref::Id("m1".to_owned()),
                    hostel_name: "Rose Villa".to_owned(),
                    city: "Islamabad".to_owned(),
                    address: "F-7 Markaz".to_owned(),
                    hostel_type: HostelFor::Girls,
                    pricing: vec![pricing("double", 11000, 1)],
                    facilities: vec![],
                    description: None,
                    images: vec![],
                },
            ],
            fee_per_student: 500,
            ..Default::default()
        };

        for (token, id) in [
            ("admin-token", "a1"),
            ("subadmin-token", "sa1"),
            ("manager-token", "m1"),
            ("student-token", "st1"),
            ("student2-token", "st2"),
        ] {
            state.tokens.insert(token.to_owned(), id.to_owned());
        }

        state
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn caller(&self, headers: &HeaderMap) -> Result<User, Rejection> {
        let token = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Not authorized, no token"))?;

        let id = self
            .tokens
            .get(token)
            .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Not authorized, token failed"))?;

        self.users
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "User not found"))
    }

    fn hostel_manager(&self, hostel: &str) -> Option<String> {
        self.hostels
            .iter()
            .find(|h| h.id == hostel)
            .map(|h| h.manager.id().to_owned())
    }
}

pub(crate) type Shared = Arc<Mutex<MockState>>;
type Rejection = (StatusCode, Json<Value>);
type ApiResult = Result<Json<Value>, Rejection>;

fn ok<T: Serialize>(value: T) -> ApiResult {
    Ok(Json(serde_json::to_value(Envelope::ok(value)).unwrap()))
}

fn reject(status: StatusCode, message: &str) -> Rejection {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
}

fn bad_request(message: &str) -> Rejection {
    reject(StatusCode::BAD_REQUEST, message)
}

fn not_found(message: &str) -> Rejection {
    reject(StatusCode::NOT_FOUND, message)
}

/// Records every call and injects queued failures.
async fn record<B>(State(state): State<Shared>, req: Request<B>, next: Next<B>) -> Response {
    let failure = {
        let mut state = state.lock();
        state.calls.push(format!("{} {}", req.method(), req.uri()));
        let authorization = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        state.authorization.push(authorization);
        state.fail_next.take()
    };

    if let Some((status, message)) = failure {
        return match message {
            Some(message) => (status, Json(json!({ "message": message }))).into_response(),
            None => status.into_response(),
        };
    }

    next.run(req).await
}

/// Reads a multipart submission, keeping track of its files.
async fn read_form<T: DeserializeOwned>(state: &Shared, mut multipart: Multipart) -> Result<T, Rejection> {
    let mut data = Value::Null;

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_owned();
        if name == "data" {
            data = serde_json::from_str(&field.text().await.unwrap())
                .map_err(|_| bad_request("Invalid data field"))?;
        } else {
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let len = field.bytes().await.unwrap().len();
            state.lock().uploads.push(Upload {
                field: name,
                file_name,
                content_type,
                len,
            });
        }
    }

    state.lock().last_data = Some(data.clone());
    serde_json::from_value(data).map_err(|_| bad_request("Invalid data field"))
}

#[derive(Deserialize)]
struct StatusQuery<S> {
    status: Option<S>,
}

#[derive(Deserialize)]
struct RoleQuery {
    role: Option<Role>,
}

// auth

async fn login(State(state): State<Shared>, Json(desc): Json<LoginDescriptor>) -> ApiResult {
    let state = state.lock();
    let user = state
        .users
        .iter()
        .find(|u| u.email == desc.email && desc.password == PASSWORD)
        .cloned()
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid email or password"))?;

    if user.is_terminated {
        return Err(reject(StatusCode::FORBIDDEN, "Your account has been terminated"));
    }

    let token = state
        .tokens
        .iter()
        .find(|(_, id)| **id == user.id)
        .map(|(token, _)| token.clone())
        .unwrap();

    ok(AuthResult { user, token })
}

async fn register(
    State(state): State<Shared>,
    Json(desc): Json<RegisterDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    if !matches!(desc.role, Role::Student | Role::Manager) {
        return Err(bad_request("Invalid role"));
    }
    if state.users.iter().any(|u| u.email == desc.email) {
        return Err(bad_request("Email already registered"));
    }

    let id = state.next_id("u");
    let mut created = user(&id, &desc.name, &desc.email, desc.role);
    created.phone = desc.phone;
    let token = format!("{id}-token");
    state.tokens.insert(token.clone(), id);
    state.users.push(created.clone());
    ok(AuthResult {
        user: created,
        token,
    })
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    ok(state.lock().caller(&headers)?)
}

// users

async fn list_users(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<RoleQuery>,
) -> ApiResult {
    let state = state.lock();
    state.caller(&headers)?;
    ok(state
        .users
        .iter()
        .filter(|u| query.role.map_or(true, |r| u.role == r))
        .collect::<Vec<_>>())
}

async fn create_subadmin(
    State(state): State<Shared>,
    Json(desc): Json<MakeSubadminDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    if state.users.iter().any(|u| u.email == desc.email) {
        return Err(bad_request("Email already registered"));
    }
    let id = state.next_id("sa");
    let created = user(&id, &desc.name, &desc.email, Role::Subadmin);
    state.users.push(created.clone());
    ok(created)
}

async fn terminate_user(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(desc): Json<TerminateDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    let user = state
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| not_found("User not found"))?;
    user.is_terminated = true;
    user.termination_reason = Some(desc.reason);
    ok(user.clone())
}

async fn reactivate_user(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let mut state = state.lock();
    let user = state
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| not_found("User not found"))?;
    user.is_terminated = false;
    user.termination_reason = None;
    ok(user.clone())
}

// hostels

async fn list_hostels(State(state): State<Shared>, Query(query): Query<HostelQuery>) -> ApiResult {
    let state = state.lock();
    ok(state
        .hostels
        .iter()
        .filter(|h| {
            query
                .city
                .as_ref()
                .map_or(true, |c| h.city.eq_ignore_ascii_case(c))
        })
        .filter(|h| query.hostel_type.map_or(true, |t| h.hostel_type == t))
        .filter(|h| {
            query.search.as_ref().map_or(true, |s| {
                h.hostel_name.to_lowercase().contains(&s.to_lowercase())
            })
        })
        .collect::<Vec<_>>())
}

async fn get_hostel(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let state = state.lock();
    ok(state
        .hostels
        .iter()
        .find(|h| h.id == id)
        .ok_or_else(|| not_found("Hostel not found"))?)
}

async fn my_hostels(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    ok(state
        .hostels
        .iter()
        .filter(|h| h.manager.id() == me.id)
        .collect::<Vec<_>>())
}

async fn create_hostel(
    State(state): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult {
    let desc: HostelDescriptor = read_form(&state, multipart).await?;
    let mut state = state.lock();
    let me = state.caller(&headers)?;

    let approved = state
        .verifications
        .iter()
        .any(|v| v.manager.id() == me.id && v.status == VerificationStatus::Approved);
    if !approved {
        return Err(reject(
            StatusCode::FORBIDDEN,
            "Your account is not verified yet",
        ));
    }

    let hostel = Hostel {
        id: state.next_id("h"),
        manager: Ref::Id(me.id),
        hostel_name: desc.hostel_name,
        city: desc.city,
        address: desc.address,
        hostel_type: desc.hostel_type,
        pricing: desc.pricing,
        facilities: desc.facilities,
        description: desc.description,
        images: vec![],
    };
    state.hostels.push(hostel.clone());
    ok(hostel)
}

async fn edit_hostel(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(desc): Json<EditHostelDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    let hostel = state
        .hostels
        .iter_mut()
        .find(|h| h.id == id)
        .ok_or_else(|| not_found("Hostel not found"))?;

    if let Some(name) = desc.hostel_name {
        hostel.hostel_name = name;
    }
    if let Some(address) = desc.address {
        hostel.address = address;
    }
    if let Some(pricing) = desc.pricing {
        hostel.pricing = pricing;
    }
    if let Some(facilities) = desc.facilities {
        hostel.facilities = facilities;
    }
    if desc.description.is_some() {
        hostel.description = desc.description;
    }
    ok(hostel.clone())
}

async fn delete_hostel(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let mut state = state.lock();
    let before = state.hostels.len();
    state.hostels.retain(|h| h.id != id);
    if state.hostels.len() == before {
        return Err(not_found("Hostel not found"));
    }
    ok(())
}

// reservations

async fn create_reservation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(desc): Json<ReservationDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    let me = state.caller(&headers)?;
    let reservation = Reservation {
        id: state.next_id("r"),
        student: Ref::Id(me.id),
        hostel: Ref::Id(desc.hostel_id),
        message: desc.message,
        status: ReservationStatus::Pending,
        created_at: Some(chrono::Utc::now()),
    };
    state.reservations.push(reservation.clone());
    ok(reservation)
}

async fn my_reservations(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    ok(state
        .reservations
        .iter()
        .filter(|r| r.student.id() == me.id)
        .collect::<Vec<_>>())
}

async fn incoming_reservations(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    ok(state
        .reservations
        .iter()
        .filter(|r| state.hostel_manager(r.hostel.id()).as_deref() == Some(me.id.as_str()))
        .collect::<Vec<_>>())
}

async fn decide_reservation(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(desc): Json<ReservationDecision>,
) -> ApiResult {
    let mut state = state.lock();
    let reservation = state
        .reservations
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found("Reservation not found"))?;
    if reservation.status != ReservationStatus::Pending {
        return Err(bad_request("Reservation already decided"));
    }
    reservation.status = desc.status;
    ok(reservation.clone())
}

// bookings

async fn create_booking(
    State(state): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult {
    let desc: BookingDescriptor = read_form(&state, multipart).await?;
    let mut state = state.lock();
    let me = state.caller(&headers)?;

    if state
        .bookings
        .iter()
        .any(|b| b.student.id() == me.id && b.status.is_active())
    {
        return Err(bad_request("You already have an active booking"));
    }

    let booking = Booking {
        id: state.next_id("b"),
        student: Ref::Id(me.id),
        hostel: Ref::Id(desc.hostel_id),
        room_type: desc.room_type,
        amount: desc.amount,
        transaction_image: Some("/uploads/transaction.png".to_owned()),
        refund_image: None,
        disapproval_reason: None,
        status: BookingStatus::Pending,
        termination_reason: None,
        created_at: Some(chrono::Utc::now()),
    };
    state.bookings.push(booking.clone());
    ok(booking)
}

async fn my_bookings(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    ok(state
        .bookings
        .iter()
        .filter(|b| b.student.id() == me.id)
        .collect::<Vec<_>>())
}

async fn incoming_bookings(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery<BookingStatus>>,
) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    ok(state
        .bookings
        .iter()
        .filter(|b| state.hostel_manager(b.hostel.id()).as_deref() == Some(me.id.as_str()))
        .filter(|b| query.status.map_or(true, |s| b.status == s))
        .collect::<Vec<_>>())
}

fn booking_mut<'a>(state: &'a mut MockState, id: &str) -> Result<&'a mut Booking, Rejection> {
    state
        .bookings
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| not_found("Booking not found"))
}

async fn approve_booking(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let mut state = state.lock();
    let booking = booking_mut(&mut state, &id)?;
    if booking.status != BookingStatus::Pending {
        return Err(bad_request("Booking is not pending"));
    }
    booking.status = BookingStatus::Approved;
    let booking = booking.clone();

    if let Some(hostel) = state.hostels.iter_mut().find(|h| h.id == booking.hostel.id()) {
        if let Some(room) = hostel
            .pricing
            .iter_mut()
            .find(|p| p.room_type == booking.room_type)
        {
            room.available_rooms = room.available_rooms.saturating_sub(1);
        }
    }
    ok(booking)
}

async fn disapprove_booking(
    State(state): State<Shared>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult {
    let desc: DisapproveDescriptor = read_form(&state, multipart).await?;
    let mut state = state.lock();
    let booking = booking_mut(&mut state, &id)?;
    if booking.status != BookingStatus::Pending {
        return Err(bad_request("Booking is not pending"));
    }
    booking.status = BookingStatus::Refunded;
    booking.refund_image = Some("/uploads/refund.png".to_owned());
    booking.disapproval_reason = Some(desc.reason);
    ok(booking.clone())
}

async fn leave_booking(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let mut state = state.lock();
    let booking = booking_mut(&mut state, &id)?;
    if booking.status != BookingStatus::Approved {
        return Err(bad_request("Only approved bookings can be left"));
    }
    booking.status = BookingStatus::Left;
    ok(booking.clone())
}

async fn kick_booking(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(desc): Json<KickDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    let booking = booking_mut(&mut state, &id)?;
    if booking.status != BookingStatus::Approved {
        return Err(bad_request("Only approved bookings can be terminated"));
    }
    booking.status = BookingStatus::Terminated;
    booking.termination_reason = Some(desc.reason);
    ok(booking.clone())
}

// verifications

async fn submit_verification(
    State(state): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult {
    let desc: VerificationDescriptor = read_form(&state, multipart).await?;
    let mut state = state.lock();
    let me = state.caller(&headers)?;
    let verification = ManagerVerification {
        id: state.next_id("v"),
        manager: Ref::Id(me.id),
        owner_name: desc.owner_name,
        city: desc.city,
        address: desc.address,
        hostel_for: desc.hostel_for,
        payment_details: desc.payment_details,
        building_images: vec!["/uploads/building.png".to_owned()],
        status: VerificationStatus::Pending,
        remarks: None,
        created_at: Some(chrono::Utc::now()),
    };
    state.verifications.push(verification.clone());
    ok(verification)
}

async fn my_verification(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    ok(state
        .verifications
        .iter()
        .rev()
        .find(|v| v.manager.id() == me.id))
}

async fn list_verifications(
    State(state): State<Shared>,
    Query(query): Query<StatusQuery<VerificationStatus>>,
) -> ApiResult {
    let state = state.lock();
    ok(state
        .verifications
        .iter()
        .filter(|v| query.status.map_or(true, |s| v.status == s))
        .collect::<Vec<_>>())
}

async fn review_verification(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(desc): Json<ReviewDescriptor<VerificationStatus>>,
) -> ApiResult {
    let mut state = state.lock();
    let verification = state
        .verifications
        .iter_mut()
        .find(|v| v.id == id)
        .ok_or_else(|| not_found("Verification not found"))?;
    if verification.status != VerificationStatus::Pending {
        return Err(bad_request("Verification already reviewed"));
    }
    verification.status = desc.status;
    verification.remarks = desc.remarks;
    ok(verification.clone())
}

// fees

async fn pending_summary(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    let month = Month::new(2024, 5).unwrap();

    ok(state
        .hostels
        .iter()
        .filter(|h| h.manager.id() == me.id)
        .map(|h| {
            let student_count = state
                .bookings
                .iter()
                .filter(|b| b.hostel.id() == h.id && b.status == BookingStatus::Approved)
                .count() as u32;
            FeeSummary {
                hostel: h.id.clone(),
                hostel_name: h.hostel_name.clone(),
                month,
                student_count,
                fee_per_student: state.fee_per_student,
                fee_amount: student_count * state.fee_per_student,
                submitted: state
                    .fees
                    .iter()
                    .any(|f| f.hostel.id() == h.id && f.month == month),
            }
        })
        .collect::<Vec<_>>())
}

async fn submit_fee(
    State(state): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult {
    let desc: FeeDescriptor = read_form(&state, multipart).await?;
    let mut state = state.lock();
    let me = state.caller(&headers)?;

    if state
        .fees
        .iter()
        .any(|f| f.hostel.id() == desc.hostel_id && f.month == desc.month)
    {
        return Err(bad_request("Fee already submitted for this month"));
    }

    let fee = Fee {
        id: state.next_id("f"),
        manager: Ref::Id(me.id),
        hostel: Ref::Id(desc.hostel_id),
        month: desc.month,
        student_count: desc.student_count,
        fee_amount: desc.fee_amount,
        proof_image: Some("/uploads/proof.png".to_owned()),
        status: FeeStatus::Pending,
        remarks: None,
    };
    state.fees.push(fee.clone());
    ok(fee)
}

async fn my_fees(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    ok(state
        .fees
        .iter()
        .filter(|f| f.manager.id() == me.id)
        .collect::<Vec<_>>())
}

async fn list_fees(
    State(state): State<Shared>,
    Query(query): Query<StatusQuery<FeeStatus>>,
) -> ApiResult {
    let state = state.lock();
    ok(state
        .fees
        .iter()
        .filter(|f| query.status.map_or(true, |s| f.status == s))
        .collect::<Vec<_>>())
}

async fn review_fee(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(desc): Json<ReviewDescriptor<FeeStatus>>,
) -> ApiResult {
    let mut state = state.lock();
    let fee = state
        .fees
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| not_found("Fee not found"))?;
    if fee.status != FeeStatus::Pending {
        return Err(bad_request("Fee already reviewed"));
    }
    fee.status = desc.status;
    fee.remarks = desc.remarks;
    ok(fee.clone())
}

// reports

async fn file_report(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(desc): Json<ReportDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    let me = state.caller(&headers)?;
    let booking = state
        .bookings
        .iter()
        .find(|b| b.id == desc.booking_id && b.student.id() == me.id)
        .cloned()
        .ok_or_else(|| not_found("Booking not found"))?;
    let manager = state
        .hostel_manager(booking.hostel.id())
        .ok_or_else(|| not_found("Hostel not found"))?;

    let report = Report {
        id: state.next_id("rp"),
        student: Ref::Id(me.id),
        manager: Ref::Id(manager),
        booking: Ref::Populated(booking),
        description: desc.description,
        status: ReportStatus::Open,
        decision: None,
        final_resolution: None,
        created_at: Some(chrono::Utc::now()),
    };
    state.reports.push(report.clone());
    ok(report)
}

async fn my_reports(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    ok(state
        .reports
        .iter()
        .filter(|r| r.student.id() == me.id)
        .collect::<Vec<_>>())
}

async fn list_reports(
    State(state): State<Shared>,
    Query(query): Query<StatusQuery<ReportStatus>>,
) -> ApiResult {
    let state = state.lock();
    ok(state
        .reports
        .iter()
        .filter(|r| query.status.map_or(true, |s| r.status == s))
        .collect::<Vec<_>>())
}

async fn resolve_report(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(desc): Json<ResolveDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    let report = state
        .reports
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found("Report not found"))?;
    if report.status == ReportStatus::Resolved {
        return Err(bad_request("Report already resolved"));
    }
    report.status = ReportStatus::Resolved;
    report.decision = Some(desc.decision);
    report.final_resolution = Some(desc.final_resolution);
    ok(report.clone())
}

// chat

async fn conversations(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let state = state.lock();
    let me = state.caller(&headers)?;
    ok(state
        .conversations
        .iter()
        .filter(|c| c.participants.iter().any(|p| p.id() == me.id))
        .collect::<Vec<_>>())
}

async fn start_conversation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(desc): Json<StartConversationDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    let me = state.caller(&headers)?;

    let existing = state.conversations.iter().find(|c| {
        c.participants.iter().any(|p| p.id() == me.id)
            && c.participants.iter().any(|p| p.id() == desc.participant_id)
    });
    if let Some(conversation) = existing {
        return ok(conversation);
    }

    let conversation = Conversation {
        id: state.next_id("c"),
        participants: vec![Ref::Id(me.id), Ref::Id(desc.participant_id)],
        last_message: None,
        updated_at: Some(chrono::Utc::now()),
    };
    state.conversations.push(conversation.clone());
    ok(conversation)
}

async fn messages(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let state = state.lock();
    ok(state
        .messages
        .iter()
        .filter(|m| m.conversation == id)
        .collect::<Vec<_>>())
}

async fn send_message(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(desc): Json<SendMessageDescriptor>,
) -> ApiResult {
    let mut state = state.lock();
    let me = state.caller(&headers)?;
    let message = Message {
        id: state.next_id("msg"),
        conversation: id.clone(),
        sender: Ref::Id(me.id),
        text: desc.text,
        created_at: chrono::Utc::now(),
    };

    let conversation = state
        .conversations
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("Conversation not found"))?;
    conversation.last_message = Some(message.text.clone());
    conversation.updated_at = Some(message.created_at);

    state.messages.push(message.clone());
    ok(message)
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/users", get(list_users))
        .route("/users/subadmins", post(create_subadmin))
        .route("/users/:id/terminate", patch(terminate_user))
        .route("/users/:id/reactivate", patch(reactivate_user))
        .route("/hostels", get(list_hostels).post(create_hostel))
        .route("/hostels/mine", get(my_hostels))
        .route(
            "/hostels/:id",
            get(get_hostel).patch(edit_hostel).delete(delete_hostel),
        )
        .route("/reservations", post(create_reservation))
        .route("/reservations/mine", get(my_reservations))
        .route("/reservations/manager", get(incoming_reservations))
        .route("/reservations/:id", patch(decide_reservation))
        .route("/bookings", post(create_booking))
        .route("/bookings/mine", get(my_bookings))
        .route("/bookings/manager", get(incoming_bookings))
        .route("/bookings/:id/approve", post(approve_booking))
        .route("/bookings/:id/disapprove", post(disapprove_booking))
        .route("/bookings/:id/leave", post(leave_booking))
        .route("/bookings/:id/kick", post(kick_booking))
        .route(
            "/verifications",
            get(list_verifications).post(submit_verification),
        )
        .route("/verifications/me", get(my_verification))
        .route("/verifications/:id/review", patch(review_verification))
        .route("/fees", get(list_fees).post(submit_fee))
        .route("/fees/pending-summary", get(pending_summary))
        .route("/fees/mine", get(my_fees))
        .route("/fees/:id/review", patch(review_fee))
        .route("/reports", get(list_reports).post(file_report))
        .route("/reports/mine", get(my_reports))
        .route("/reports/:id/resolve", post(resolve_report))
        .route(
            "/chat/conversations",
            get(conversations).post(start_conversation),
        )
        .route(
            "/chat/conversations/:id/messages",
            get(messages).post(send_message),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

/// A running mock API.
pub(crate) struct MockApi {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl MockApi {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::seeded()));
        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(router(state.clone()).into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A context with nobody logged in.
    pub fn anonymous(&self) -> Context {
        Context::new(self.url(), Session::in_memory()).unwrap()
    }

    /// A context logged in with one of the seeded tokens.
    pub fn context(&self, token: &str) -> Context {
        let cx = self.anonymous();
        let state = self.state.lock();
        let id = state.tokens.get(token).unwrap();
        let user = state.users.iter().find(|u| &u.id == id).unwrap().clone();
        cx.session.set(AccountInfo {
            token: token.to_owned(),
            user: Arc::new(user),
        });
        cx
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        let mut state = self.state.lock();
        state.calls.clear();
        state.authorization.clear();
    }

    /// `Authorization` headers of the recorded calls, in order.
    pub fn authorization(&self) -> Vec<Option<String>> {
        self.state.lock().authorization.clone()
    }

    pub fn fail_next(&self, status: StatusCode, message: Option<&str>) {
        self.state.lock().fail_next = Some((status, message.map(str::to_owned)));
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.state.lock().uploads.clone()
    }
}
