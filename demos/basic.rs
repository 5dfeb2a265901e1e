use sendopt::request::{with_header, with_json_body, with_param};
use sendopt::RequestBuilder;

#[tokio::main]
async fn main() {
  let response = sendopt::send("GET", "https://httpbin.org/get?source=demo", [
    with_param("page", "2"),
    with_header("Accept", "application/json"),
  ]).await;

  match response {
    Ok(response) => {
      println!("{}", response.text().await.unwrap());
    }
    Err(e) => {
      println!("{:#?}", e);
    }
  }

  let response = RequestBuilder::post("https://httpbin.org/post")
    .with_option(with_json_body(serde_json::json!({ "name": "widget", "count": 3 })))
    .send()
    .await;

  match response {
    Ok(response) => {
      println!("{}", response.text().await.unwrap());
    }
    Err(e) => {
      println!("{:#?}", e);
    }
  }
}
