mod helpers;

use helpers::{first_a, query_message, MockBehavior, MockDnsServer};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;
use pinpoint_dns_application::ports::UpstreamExchange;
use pinpoint_dns_domain::DomainError;
use pinpoint_dns_infrastructure::dns::UdpExchange;
use std::net::Ipv4Addr;
use std::time::Duration;

fn exchange() -> UdpExchange {
    UdpExchange::new(Duration::from_millis(300))
}

#[tokio::test]
async fn test_exchange_returns_decoded_answer() {
    let server = MockDnsServer::start(MockBehavior::Answer(Ipv4Addr::new(93, 184, 216, 34)))
        .await
        .unwrap();
    let request = query_message(0x1234, "example.com.", RecordType::A);

    let response = exchange().exchange(server.addr(), &request).await.unwrap();

    assert_eq!(response.id(), 0x1234);
    assert_eq!(first_a(&response), Some(Ipv4Addr::new(93, 184, 216, 34)));
    assert_eq!(server.received(), 1);
}

#[tokio::test]
async fn test_exchange_passes_through_error_rcodes() {
    let server = MockDnsServer::start(MockBehavior::Rcode(ResponseCode::NXDomain))
        .await
        .unwrap();
    let request = query_message(1, "missing.example.", RecordType::A);

    let response = exchange().exchange(server.addr(), &request).await.unwrap();

    assert_eq!(response.response_code(), ResponseCode::NXDomain);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let server = MockDnsServer::start(MockBehavior::Silent).await.unwrap();
    let request = query_message(2, "example.com.", RecordType::A);

    let result = exchange().exchange(server.addr(), &request).await;

    assert!(matches!(result, Err(DomainError::TransportTimeout { .. })));
}

#[tokio::test]
async fn test_mismatched_id_is_rejected() {
    let server = MockDnsServer::start(MockBehavior::WrongId).await.unwrap();
    let request = query_message(3, "example.com.", RecordType::A);

    let result = exchange().exchange(server.addr(), &request).await;

    assert!(matches!(result, Err(DomainError::InvalidDnsResponse { .. })));
}

#[tokio::test]
async fn test_undecodable_reply_is_rejected() {
    let server = MockDnsServer::start(MockBehavior::Garbage).await.unwrap();
    let request = query_message(4, "example.com.", RecordType::A);

    let result = exchange().exchange(server.addr(), &request).await;

    assert!(matches!(result, Err(DomainError::InvalidDnsResponse { .. })));
}
