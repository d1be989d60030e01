use crate::domain::ClientError;
use reqwest::{Error as ReqwestError, Response};
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turns a gateway response into its JSON body, or into a
/// [`ClientError::Status`] carrying the gateway's public message.
pub async fn handle_response<T>(req: Result<Response, ReqwestError>) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    let res = req?;
    let status = res.status();

    if !status.is_success() {
        let message = match res.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
        };

        return Err(ClientError::Status { status, message });
    }

    Ok(res.json().await?)
}

pub fn readline() -> Result<Option<String>, ClientError> {
    let mut buffer = String::new();
    let read = std::io::stdin().read_line(&mut buffer)?;

    Ok((read > 0).then_some(buffer))
}
