//! End-to-end fulfillment flow against the in-memory store
//!
//! Walks one order through the whole lifecycle: intake → stock match →
//! production → delivery request → delivered, then checks the dashboard
//! snapshot and notification trail the UI would read back.

use std::sync::Arc;

use chrono::Utc;
use fulfillment_engine::{
    Engine, EngineConfig, IdentityProvider, MemoryStore, MetricsInputs, MockIdentity, Query,
    RecordStore, compute_metrics, find_candidates,
};
use shared::models::{
    CommunicationCreate, CommunicationKind, DeliveryRequestCreate, DeliveryStatus, OrderCreate,
    OrderStatus, Role, StockStatus, StockVehicleCreate, UserProfile, VehicleSpec,
};

fn make_profile() -> UserProfile {
    UserProfile {
        id: "sales-1".to_string(),
        email: "sales@example.com".to_string(),
        display_name: Some("Sam Sales".to_string()),
        role: Role::Sales,
    }
}

fn order_payload() -> OrderCreate {
    OrderCreate {
        customer_name: "Jo Fleet".to_string(),
        customer_email: "jo@example.com".to_string(),
        vehicle: VehicleSpec {
            model: "X5".to_string(),
            trim: "M Sport".to_string(),
            color: "Black".to_string(),
        },
        order_value: 61_500.0,
        order_date: Utc::now(),
    }
}

fn stock_payload() -> StockVehicleCreate {
    StockVehicleCreate {
        vin: "WBA12345".to_string(),
        // different casing on purpose: matching is case-insensitive
        vehicle: VehicleSpec {
            model: "x5".to_string(),
            trim: "m sport".to_string(),
            color: "black".to_string(),
        },
        year: 2024,
        price: 58_000.0,
        location: "Leeds".to_string(),
    }
}

#[tokio::test]
async fn full_order_journey() {
    let store = Arc::new(MemoryStore::new());
    let engine = Engine::new(store.clone(), &EngineConfig::default());

    let identity = MockIdentity::signed_in(make_profile());
    let user = identity.current_user().await.unwrap().unwrap();

    // Intake: one pending order, one available vehicle
    let order = engine
        .orders
        .create_order(order_payload(), &user, Utc::now())
        .await
        .unwrap();
    let vehicle = engine
        .stock
        .add_vehicle(stock_payload(), &user, Utc::now())
        .await
        .unwrap();
    let order_id = order.id.clone().unwrap();
    let stock_id = vehicle.id.clone().unwrap();

    // The operator sees exactly one candidate pairing
    let stock = store.list_stock_vehicles(&Query::new()).await.unwrap();
    let orders = store.list_orders(&Query::new()).await.unwrap();
    let candidates = find_candidates(&stock, &orders);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[&stock_id].len(), 1);

    // Reservation confirms the order and reserves the vehicle
    let reservation = engine
        .matcher
        .reserve(&order_id, &stock_id, Utc::now())
        .await
        .unwrap();
    assert_eq!(reservation.order.status, OrderStatus::Confirmed);
    assert_eq!(reservation.order.vin.as_deref(), Some("WBA12345"));
    assert_eq!(reservation.stock_vehicle.status, StockStatus::Reserved);

    // Forward through production
    for target in [OrderStatus::InProduction, OrderStatus::Built] {
        engine
            .orders
            .transition(&order_id, target, Utc::now())
            .await
            .unwrap();
    }

    // Broker raises and the team works the delivery request
    let request = engine
        .delivery
        .request_delivery(
            DeliveryRequestCreate {
                order_id: order_id.clone(),
                pickup_address: "1 Plant Way".to_string(),
                delivery_address: "2 Fleet Street".to_string(),
                contact_name: "Jo Fleet".to_string(),
                contact_phone: "07000 000000".to_string(),
                preferred_date: Utc::now().date_naive(),
                special_instructions: None,
            },
            &user,
            Utc::now(),
        )
        .await
        .unwrap();
    let request_id = request.id.clone().unwrap();
    for target in [
        DeliveryStatus::Approved,
        DeliveryStatus::InProgress,
        DeliveryStatus::Completed,
    ] {
        engine
            .delivery
            .advance(&request_id, target, Utc::now())
            .await
            .unwrap();
    }

    // Hand over the vehicle
    for target in [OrderStatus::InTransit, OrderStatus::Delivered] {
        engine
            .orders
            .transition(&order_id, target, Utc::now())
            .await
            .unwrap();
    }
    let delivered = store.get_order(&order_id).await.unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.delivery_date.is_some());

    // A customer note lands in the order's log
    engine
        .communications
        .post(
            CommunicationCreate {
                order_id: order_id.clone(),
                message: "Keys handed over, customer happy".to_string(),
                kind: CommunicationKind::Note,
            },
            &user,
        )
        .await
        .unwrap();
    let log = engine.communications.for_order(&order_id).await.unwrap();
    // delivery request entry + the note
    assert_eq!(log.len(), 2);

    // Dashboard snapshot for this operator
    let orders = store
        .list_orders(&Query::new().filter("user_id", &user.id))
        .await
        .unwrap();
    let requests = store
        .list_delivery_requests(&Query::new().filter("user_id", &user.id))
        .await
        .unwrap();
    let communications = store
        .list_communications(&Query::new().filter("user_id", &user.id))
        .await
        .unwrap();
    let metrics = compute_metrics(
        &MetricsInputs {
            orders: &orders,
            delivery_requests: &requests,
            communications: &communications,
            stock: Some(&stock),
        },
        Utc::now(),
    );
    assert_eq!(metrics.total_orders, 1);
    assert_eq!(metrics.delivered_orders, 1);
    assert_eq!(metrics.total_revenue, 61_500.0);
    assert_eq!(metrics.monthly_revenue, 61_500.0);
    assert_eq!(metrics.average_order_value, 61_500.0);
    assert_eq!(metrics.delivery_requests, 1);
    assert_eq!(metrics.communications_today, 2);
    assert_eq!(metrics.last_seven_days.len(), 7);
    assert_eq!(metrics.last_seven_days[6].order_count, 1);

    // Every milestone left a notification; sweep them read
    let unread = store
        .list_notifications(&Query::new().filter("is_read", false))
        .await
        .unwrap();
    assert!(!unread.is_empty());
    let flipped = engine.notifications.mark_all_read(&user.id).await.unwrap();
    assert_eq!(flipped, unread.len());
}

#[tokio::test]
async fn cancelled_order_stops_accepting_transitions() {
    let store = Arc::new(MemoryStore::new());
    let engine = Engine::new(store, &EngineConfig::default());
    let user = make_profile();

    let order = engine
        .orders
        .create_order(order_payload(), &user, Utc::now())
        .await
        .unwrap();
    let order_id = order.id.unwrap();

    engine
        .orders
        .transition(&order_id, OrderStatus::Cancelled, Utc::now())
        .await
        .unwrap();
    assert!(
        engine
            .orders
            .transition(&order_id, OrderStatus::Confirmed, Utc::now())
            .await
            .is_err()
    );
}
