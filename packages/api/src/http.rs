//! [`Gateway`] over HTTP/JSON using `reqwest`.

use records::config::ApiConfig;
use records::{
    NewUser, NewVaccinationRecord, NewVaccine, User, UserId, VaccinationRecord, Vaccine,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::gateway::{paths, Gateway};
use crate::TransportError;

/// Gateway talking to the real backend.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    api: ApiConfig,
}

impl HttpGateway {
    pub fn new(api: ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), api)
    }

    pub fn with_client(client: reqwest::Client, api: ApiConfig) -> Self {
        Self { client, api }
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = self.api.endpoint(path);
        tracing::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        tracing::debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().await?;
        decode(response).await
    }
}

/// Turn a response into `T`, mapping non-2xx statuses to [`TransportError::Status`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

impl Gateway for HttpGateway {
    async fn list_users(&self) -> Result<Vec<User>, TransportError> {
        self.get_json(paths::USERS).await
    }

    async fn get_user(&self, id: UserId) -> Result<User, TransportError> {
        self.get_json(&paths::user(id)).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, TransportError> {
        self.post_json(paths::USERS, user).await
    }

    async fn list_vaccines(&self) -> Result<Vec<Vaccine>, TransportError> {
        self.get_json(paths::VACCINES).await
    }

    async fn create_vaccine(&self, vaccine: &NewVaccine) -> Result<Vaccine, TransportError> {
        self.post_json(paths::VACCINES, vaccine).await
    }

    async fn list_records(&self, user_id: UserId) -> Result<Vec<VaccinationRecord>, TransportError> {
        self.get_json(&paths::user_records(user_id)).await
    }

    async fn create_record(
        &self,
        user_id: UserId,
        record: &NewVaccinationRecord,
    ) -> Result<VaccinationRecord, TransportError> {
        self.post_json(&paths::user_records(user_id), record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Answer one request with a canned response. The handle yields the raw
    /// request that was answered.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (base_url, server)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn gateway(base_url: String) -> HttpGateway {
        HttpGateway::with_client(reqwest::Client::new(), ApiConfig { base_url })
    }

    #[tokio::test]
    async fn test_list_users() {
        let (base_url, server) =
            serve_once("200 OK", r#"[{"id":1,"name":"Ana","age":30,"gender":"F"}]"#).await;
        let users = gateway(base_url).list_users().await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Ana");
        assert_eq!(users[0].age, Some(30));
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/user HTTP/1.1"), "{request}");
    }

    #[tokio::test]
    async fn test_create_user_posts_json() {
        let (base_url, server) = serve_once("201 Created", r#"{"id":5,"name":"Caio"}"#).await;
        let created = gateway(base_url)
            .create_user(&NewUser::new("Caio"))
            .await
            .unwrap();

        assert_eq!(created.id, 5);
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/user HTTP/1.1"), "{request}");
        assert!(request.contains(r#""name":"Caio""#), "{request}");
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let (base_url, server) = serve_once("500 Internal Server Error", "boom").await;
        let err = gateway(base_url).list_vaccines().await.unwrap_err();

        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                body: "boom".to_string(),
            }
        );
        assert!(server.await.unwrap().starts_with("GET /api/vaccine HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base_url, server) = serve_once("200 OK", "{not json").await;
        let err = gateway(base_url).list_records(3).await.unwrap_err();

        assert!(matches!(err, TransportError::Decode(_)), "{err:?}");
        assert!(server
            .await
            .unwrap()
            .starts_with("GET /api/users/3/vaccinationrecords HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let gateway = HttpGateway::new(ApiConfig {
            base_url: base_url.clone(),
        });
        assert_eq!(gateway.base_url(), base_url);
        let err = gateway.get_user(1).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)), "{err:?}");
        assert_eq!(err.status(), None);
    }
}
